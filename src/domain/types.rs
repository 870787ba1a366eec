// ==========================================
// 制造网络可靠度分析系统 - 领域类型定义
// ==========================================
// 依据: Lin & Chang (2012) - Model I / Model II 双模型
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 模型变体 (Model Variant)
// ==========================================
// Model I: 所有机器相同故障率 (单一 p 广播)
// Model II: 不同机器不同故障率 (逐机 p 向量)
// 序列化格式: SCREAMING_SNAKE_CASE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModelVariant {
    Uniform,       // Model I: 相同故障率
    Heterogeneous, // Model II: 不同故障率
}

impl fmt::Display for ModelVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelVariant::Uniform => write!(f, "UNIFORM"),
            ModelVariant::Heterogeneous => write!(f, "HETEROGENEOUS"),
        }
    }
}

// ==========================================
// 可用性等级 (Availability Level)
// ==========================================
// 展示层阈值分级: >0.9 高 / >0.7 中等 / 其余 低
// 红线: 仅由 API 层依据可靠度数值派生,引擎不产出等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AvailabilityLevel {
    Low,    // 低
    Medium, // 中等
    High,   // 高
}

impl AvailabilityLevel {
    /// 从可靠度数值派生可用性等级
    ///
    /// # 参数
    /// - `reliability`: 系统可靠度 (0.0 - 1.0)
    ///
    /// # 返回
    /// 可用性等级 (>0.9 高 / >0.7 中等 / 其余 低)
    pub fn from_reliability(reliability: f64) -> Self {
        if reliability > 0.9 {
            AvailabilityLevel::High
        } else if reliability > 0.7 {
            AvailabilityLevel::Medium
        } else {
            AvailabilityLevel::Low
        }
    }
}

impl fmt::Display for AvailabilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AvailabilityLevel::Low => write!(f, "LOW"),
            AvailabilityLevel::Medium => write!(f, "MEDIUM"),
            AvailabilityLevel::High => write!(f, "HIGH"),
        }
    }
}
