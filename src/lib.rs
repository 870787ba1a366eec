// ==========================================
// 制造网络可靠度分析系统 - 核心库
// ==========================================
// 模型依据: Lin & Chang (2012) 制造网络重工可靠度模型
// 系统定位: 决策支持系统 (计算引擎 + 驾驶舱指标)
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 可靠度计算
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{AvailabilityLevel, ModelVariant};

// 领域实体
pub use domain::{
    CapacityLattice, CapacityProbabilityTable, MachineFlow, NetworkConfig, ReliabilityReport,
};

// 引擎
pub use engine::{CapacityPlanner, EngineError, FlowEngine, ReliabilityEngine};

// API
pub use api::DashboardApi;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "制造网络可靠度分析系统";

// ==========================================
// 预编译检查
// ==========================================
