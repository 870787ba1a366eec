// ==========================================
// 制造网络可靠度分析系统 - 配置层
// ==========================================
// 职责: 默认分析参数与配置文件加载
// ==========================================

pub mod config_manager;

// 重导出核心类型
pub use config_manager::{AnalysisDefaults, ConfigManager};
