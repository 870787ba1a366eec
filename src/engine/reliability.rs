// ==========================================
// 制造网络可靠度分析系统 - 可靠度引擎
// ==========================================
// 依据: Lin & Chang (2012) - 计算步骤 1-5
// ==========================================
// 职责: 编排流量引擎与产能规划引擎, 组装可靠度报告
// 输入: 网络配置 + 可选产能格 + 可选容量概率表
// 输出: ReliabilityReport
// 红线: 纯函数, 相同输入必得相同输出, 可按配置值安全缓存
// ==========================================

use crate::domain::capacity::{CapacityLattice, CapacityProbabilityTable};
use crate::domain::network::NetworkConfig;
use crate::domain::report::{MachineFlow, ReliabilityReport};
use crate::engine::capacity_planner::CapacityPlanner;
use crate::engine::error::EngineResult;
use crate::engine::flow::FlowEngine;

// ==========================================
// ReliabilityEngine - 可靠度引擎
// ==========================================
pub struct ReliabilityEngine {
    flow_engine: FlowEngine,
    capacity_planner: CapacityPlanner,
}

impl ReliabilityEngine {
    /// 构造函数
    pub fn new() -> Self {
        Self {
            flow_engine: FlowEngine::new(),
            capacity_planner: CapacityPlanner::new(),
        }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 计算可靠度报告
    ///
    /// 计算步骤:
    /// 1. 校验配置, 计算投料数量 I
    /// 2. 计算逐机流量 f_G / f_R 与总负载 l
    /// 3. 注入产能格时求最小容量向量 y (仅注入概率表时以其支撑集为格)
    /// 4. 注入容量概率表时求 R_d = ∏ Pr{x_i >= y_i}
    /// 5. 组装报告; series_reliability (∏ p[i]) 恒产出
    ///
    /// # 参数
    /// - `config`: 网络配置
    /// - `lattice`: 产能格 (可选注入)
    /// - `table`: 容量概率表 (可选注入)
    ///
    /// # 返回
    /// - Ok(ReliabilityReport): 完整报告
    /// - Err(EngineError): 配置非法 / 网络退化 / 产能不足
    pub fn compute(
        &self,
        config: &NetworkConfig,
        lattice: Option<&CapacityLattice>,
        table: Option<&CapacityProbabilityTable>,
    ) -> EngineResult<ReliabilityReport> {
        // 1-2. 流量计算 (含配置校验)
        let flow = self.flow_engine.compute(config)?;

        // 3. 最小容量向量: 未显式注入产能格时退回概率表支撑集
        let support_lattice = match (lattice, table) {
            (None, Some(t)) => Some(t.support_lattice()),
            _ => None,
        };
        let effective_lattice = lattice.or(support_lattice.as_ref());

        let min_capacities = match effective_lattice {
            Some(lat) => Some(
                self.capacity_planner
                    .resolve_min_capacities(&flow.total_loads, lat)?,
            ),
            None => None,
        };

        // 4. 容量模型可靠度
        let meet_probabilities = match (&min_capacities, table) {
            (Some(y), Some(t)) => Some(self.capacity_planner.meet_probabilities(y, t)?),
            _ => None,
        };
        let capacity_reliability = meet_probabilities
            .as_ref()
            .map(|probs| self.capacity_planner.capacity_reliability(probs));

        // 5. 组装报告
        let machine_flows = (1..=config.machine_count)
            .map(|i| MachineFlow {
                machine_index: i,
                machine_label: config.machine_label(i),
                success_prob: config.success_probs[i - 1],
                failure_prob: config.failure_prob(i),
                general_flow: flow.general_flows[i - 1],
                rework_flow: flow.rework_flows[i - 1],
                total_load: flow.total_loads[i - 1],
                min_capacity: min_capacities.as_ref().map(|y| y[i - 1]),
                meet_probability: meet_probabilities.as_ref().map(|m| m[i - 1]),
            })
            .collect();

        tracing::debug!(
            input_quantity = flow.input_quantity,
            series_reliability = flow.series_reliability,
            capacity_reliability,
            "可靠度报告组装完成"
        );

        Ok(ReliabilityReport {
            input_quantity: flow.input_quantity,
            machine_flows,
            series_reliability: flow.series_reliability,
            capacity_reliability,
        })
    }

    /// 仅按网络配置计算 (不注入产能格与概率表)
    ///
    /// # 参数
    /// - `config`: 网络配置
    pub fn compute_basic(&self, config: &NetworkConfig) -> EngineResult<ReliabilityReport> {
        self.compute(config, None, None)
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for ReliabilityEngine {
    fn default() -> Self {
        Self::new()
    }
}
