// ==========================================
// 制造网络可靠度分析系统 - 可靠度报告领域模型
// ==========================================
// 依据: Lin & Chang (2012) - (I, f_G, f_R, l, y, R_d)
// ==========================================
// 用途: 引擎输出的纯派生值, 配置变更即整体重算, 无独立生命周期
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// MachineFlow - 单机流量行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineFlow {
    // ===== 机器标识 =====
    pub machine_index: usize,          // 机器编号 (1-based)
    pub machine_label: String,         // 业务标签 (a1..an)

    // ===== 机器参数 =====
    pub success_prob: f64,             // 成功率 p[i]
    pub failure_prob: f64,             // 故障率 q[i] = 1 - p[i]

    // ===== 流量负载 =====
    pub general_flow: f64,             // 一般处理路径输入流 f_G[i]
    pub rework_flow: f64,              // 重工路径输入流 f_R[i]
    pub total_load: f64,               // 总负载 l[i] = f_G[i] + f_R[i]

    // ===== 产能 (注入产能格后填充) =====
    pub min_capacity: Option<f64>,     // 最小容量 y[i]
    pub meet_probability: Option<f64>, // Pr{x_i >= y_i} (注入容量概率表后填充)
}

// ==========================================
// ReliabilityReport - 可靠度报告
// ==========================================
// 红线: 两种可靠度语义分列命名, 永不混同
// - series_reliability: 简化串联近似 ∏ p[i] (驾驶舱兜底展示值)
// - capacity_reliability: 容量模型 R_d = ∏ Pr{x_i >= y_i}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityReport {
    // ===== 投料 =====
    pub input_quantity: f64,               // 需投入材料数量 I

    // ===== 逐机流量 =====
    pub machine_flows: Vec<MachineFlow>,

    // ===== 可靠度 =====
    pub series_reliability: f64,           // 串联近似 ∏ p[i]
    pub capacity_reliability: Option<f64>, // 容量模型 ∏ Pr{x_i >= y_i}
}

impl ReliabilityReport {
    /// 机器数量
    pub fn machine_count(&self) -> usize {
        self.machine_flows.len()
    }

    /// 按机器编号取流量行
    ///
    /// # 参数
    /// - `machine_index`: 机器编号 (1-based)
    pub fn machine(&self, machine_index: usize) -> &MachineFlow {
        &self.machine_flows[machine_index - 1]
    }

    /// 总负载向量 l[1..n]
    pub fn total_loads(&self) -> Vec<f64> {
        self.machine_flows.iter().map(|m| m.total_load).collect()
    }

    /// 最小容量向量 y[1..n] (注入产能格后才存在)
    pub fn min_capacities(&self) -> Option<Vec<f64>> {
        self.machine_flows.iter().map(|m| m.min_capacity).collect()
    }
}
