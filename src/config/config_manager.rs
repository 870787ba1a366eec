// ==========================================
// 制造网络可靠度分析系统 - 配置管理器
// ==========================================
// 职责: 默认分析参数加载、查询、快照
// 存储: JSON 配置文件 (平台配置目录), 缺省时使用内置默认值
// ==========================================

use std::error::Error;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::api::dto::AnalysisRequest;
use crate::domain::types::ModelVariant;

// ==========================================
// AnalysisDefaults - 默认分析参数
// ==========================================
// 取值与驾驶舱侧边栏初始值一致
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisDefaults {
    pub demand: f64,          // 需求数量 d
    pub machine_count: usize, // 机器数量 n
    pub rework_end: usize,    // 产生缺陷的机器 r
    pub rework_offset: usize, // 重工回流偏移 k
    pub success_prob: f64,    // 统一成功率 p (Model I)
}

impl Default for AnalysisDefaults {
    fn default() -> Self {
        Self {
            demand: 150.0,
            machine_count: 5,
            rework_end: 4,
            rework_offset: 1,
            success_prob: 0.95,
        }
    }
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    defaults: AnalysisDefaults,
}

impl ConfigManager {
    /// 从内置默认值创建 ConfigManager
    pub fn new() -> Self {
        Self {
            defaults: AnalysisDefaults::default(),
        }
    }

    /// 从配置文件创建 ConfigManager
    ///
    /// # 参数
    /// - `path`: JSON 配置文件路径
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn Error>> {
        let raw = std::fs::read_to_string(path)?;
        let defaults: AnalysisDefaults = serde_json::from_str(&raw)?;
        Ok(Self { defaults })
    }

    /// 加载默认位置的配置, 缺失或损坏时回退内置默认值
    ///
    /// # 返回
    /// ConfigManager (总是成功, 损坏的文件记录警告后忽略)
    pub fn load_or_default() -> Self {
        let path = Self::default_config_path();
        if path.exists() {
            match Self::from_file(&path) {
                Ok(manager) => {
                    tracing::info!(path = %path.display(), "已加载配置文件");
                    return manager;
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "配置文件损坏, 使用内置默认值");
                }
            }
        }
        Self::new()
    }

    /// 默认配置文件路径 (平台配置目录)
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mfg-network-reliability")
            .join("config.json")
    }

    // ==========================================
    // 查询接口
    // ==========================================

    /// 默认分析参数
    pub fn defaults(&self) -> &AnalysisDefaults {
        &self.defaults
    }

    /// 由默认参数构造 Model I 分析请求
    pub fn default_request(&self) -> AnalysisRequest {
        AnalysisRequest {
            variant: ModelVariant::Uniform,
            demand: self.defaults.demand,
            machine_count: self.defaults.machine_count,
            rework_end: self.defaults.rework_end,
            rework_offset: self.defaults.rework_offset,
            uniform_success_prob: Some(self.defaults.success_prob),
            success_probs: None,
            capacity_lattice: None,
            capacity_table: None,
        }
    }

    /// 获取配置快照 (JSON 格式)
    ///
    /// # 用途
    /// 在分析报告导出时附带参数快照, 保证结果可复现
    pub fn get_config_snapshot(&self) -> Result<String, Box<dyn Error>> {
        Ok(serde_json::to_string(&self.defaults)?)
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
