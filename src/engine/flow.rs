// ==========================================
// 制造网络可靠度分析系统 - 流量引擎
// ==========================================
// 依据: Lin & Chang (2012) - Model I/II 投料与流量公式
// ==========================================
// 职责: 投料数量 I、逐机一般路径流 f_G、重工路径流 f_R、总负载 l
// 输入: 网络配置 (需求 + 成功率向量 + 重工子段)
// 输出: FlowResult
// 红线: 无状态引擎, 所有方法都是纯函数
// ==========================================

use crate::domain::network::NetworkConfig;
use crate::engine::error::{EngineError, EngineResult};

// ==========================================
// FlowResult - 流量计算结果
// ==========================================
// 向量下标 0..n-1 对应机器 a1..an
#[derive(Debug, Clone, PartialEq)]
pub struct FlowResult {
    pub input_quantity: f64,      // 需投入材料数量 I
    pub general_flows: Vec<f64>,  // 一般处理路径流 f_G[1..n]
    pub rework_flows: Vec<f64>,   // 重工路径流 f_R[1..n]
    pub total_loads: Vec<f64>,    // 总负载 l[1..n]
    pub series_reliability: f64,  // 串联近似 ∏ p[i]
}

// ==========================================
// FlowEngine - 流量引擎
// ==========================================
pub struct FlowEngine;

impl FlowEngine {
    /// 构造函数
    pub fn new() -> Self {
        Self
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 计算投料数量与逐机流量
    ///
    /// 公式 (Model II, Model I 为常向量特例):
    /// - I = d / ( P(1,n) + P(1,r-1)·q[r]·P(r-k,n) )
    /// - f_G[i] = I·P(1,i-1)
    /// - f_R[i] = I·P(1,r-1)·q[r]·P(r-k,i-1), i >= r-k; 否则 0
    /// - l[i] = f_G[i] + f_R[i]
    /// 其中 P(a,b) = ∏_{i=a}^{b} p[i], a > b 时为空积 1
    ///
    /// # 参数
    /// - `config`: 网络配置 (先整体校验)
    ///
    /// # 返回
    /// - Ok(FlowResult): 流量计算结果
    /// - Err(EngineError): 配置非法或网络退化
    pub fn compute(&self, config: &NetworkConfig) -> EngineResult<FlowResult> {
        self.validate(config)?;

        let n = config.machine_count;
        let r = config.rework_end;
        let entry = config.rework_entry(); // r - k
        let q_r = config.failure_prob(r);
        let probs = &config.success_probs;

        // 1. 投料数量
        let denominator = path_product(probs, 1, n)
            + path_product(probs, 1, r - 1) * q_r * path_product(probs, entry, n);
        if !denominator.is_finite() || denominator <= 0.0 {
            return Err(EngineError::DegenerateNetwork { denominator });
        }
        let input_quantity = config.demand / denominator;

        tracing::debug!(
            denominator,
            input_quantity,
            "投料数量计算完成"
        );

        // 2. 逐机流量
        let rework_base = input_quantity * path_product(probs, 1, r - 1) * q_r;
        let mut general_flows = Vec::with_capacity(n);
        let mut rework_flows = Vec::with_capacity(n);
        let mut total_loads = Vec::with_capacity(n);

        for i in 1..=n {
            let f_g = input_quantity * path_product(probs, 1, i - 1);
            // 重工流仅在回流入口 r-k 之后出现
            let f_r = if i >= entry {
                rework_base * path_product(probs, entry, i - 1)
            } else {
                0.0
            };

            general_flows.push(f_g);
            rework_flows.push(f_r);
            total_loads.push(f_g + f_r);
        }

        // 3. 串联近似可靠度
        let series_reliability = path_product(probs, 1, n);

        Ok(FlowResult {
            input_quantity,
            general_flows,
            rework_flows,
            total_loads,
            series_reliability,
        })
    }

    // ==========================================
    // 配置校验 (前置条件)
    // ==========================================

    /// 校验网络配置
    ///
    /// 规则 (可解释, 每条指明违规字段):
    /// - machine_count >= 1
    /// - demand > 0 且有限
    /// - success_probs 长度 = machine_count, 每项属于 (0, 1]
    /// - 2 <= rework_end <= machine_count
    /// - rework_offset <= rework_end - 1
    ///
    /// # 返回
    /// - Ok(()): 校验通过
    /// - Err(EngineError::InvalidConfiguration): 指明违规字段
    pub fn validate(&self, config: &NetworkConfig) -> EngineResult<()> {
        if config.machine_count < 1 {
            return Err(EngineError::InvalidConfiguration {
                field: "machine_count",
                reason: "机器数量必须为正".to_string(),
            });
        }

        if !config.demand.is_finite() || config.demand <= 0.0 {
            return Err(EngineError::InvalidConfiguration {
                field: "demand",
                reason: format!("需求数量必须为正且有限, 实际为{}", config.demand),
            });
        }

        if config.success_probs.len() != config.machine_count {
            return Err(EngineError::InvalidConfiguration {
                field: "success_probs",
                reason: format!(
                    "成功率向量长度{}与机器数量{}不一致",
                    config.success_probs.len(),
                    config.machine_count
                ),
            });
        }

        for (idx, p) in config.success_probs.iter().enumerate() {
            if !p.is_finite() || *p <= 0.0 || *p > 1.0 {
                return Err(EngineError::InvalidConfiguration {
                    field: "success_probs",
                    reason: format!("机器a{}成功率{}不在(0,1]区间", idx + 1, p),
                });
            }
        }

        if config.rework_end < 2 || config.rework_end > config.machine_count {
            return Err(EngineError::InvalidConfiguration {
                field: "rework_end",
                reason: format!(
                    "重工检验机器r={}必须满足 2 <= r <= n={}",
                    config.rework_end, config.machine_count
                ),
            });
        }

        if config.rework_offset > config.rework_end - 1 {
            return Err(EngineError::InvalidConfiguration {
                field: "rework_offset",
                reason: format!(
                    "重工回流偏移k={}必须满足 0 <= k <= r-1={}",
                    config.rework_offset,
                    config.rework_end - 1
                ),
            });
        }

        Ok(())
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for FlowEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 路径成功率乘积
// ==========================================

/// P(a,b) = ∏_{i=a}^{b} p[i] (1-based 闭区间, a > b 时为空积 1)
fn path_product(probs: &[f64], from: usize, to: usize) -> f64 {
    if from > to {
        return 1.0;
    }
    probs[from - 1..=to - 1].iter().product()
}
