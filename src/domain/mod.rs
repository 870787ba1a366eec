// ==========================================
// 制造网络可靠度分析系统 - 领域模型层
// ==========================================
// 依据: Lin & Chang (2012) 制造网络重工可靠度模型
// ==========================================
// 职责: 定义领域实体、类型、业务规则接口
// 红线: 不含引擎逻辑,不含展示逻辑
// ==========================================

pub mod capacity;
pub mod network;
pub mod report;
pub mod types;

// 重导出核心类型
pub use capacity::{CapacityLattice, CapacityProbabilityTable, MachineCapacityDistribution};
pub use network::NetworkConfig;
pub use report::{MachineFlow, ReliabilityReport};
pub use types::{AvailabilityLevel, ModelVariant};
