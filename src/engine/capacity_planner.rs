// ==========================================
// 制造网络可靠度分析系统 - 产能规划引擎
// ==========================================
// 依据: Lin & Chang (2012) - 最小容量向量 y 与 R_d = ∏ Pr{x_i >= y_i}
// ==========================================
// 职责: 在注入的产能格上求最小容量向量, 在容量概率表上求容量模型可靠度
// 红线: 无状态引擎, 产能格与概率表永不硬编码
// ==========================================

use crate::domain::capacity::{CapacityLattice, CapacityProbabilityTable};
use crate::engine::error::{EngineError, EngineResult};

// ==========================================
// CapacityPlanner - 产能规划引擎
// ==========================================
pub struct CapacityPlanner;

impl CapacityPlanner {
    /// 构造函数
    pub fn new() -> Self {
        Self
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 求最小容量向量 y[1..n]
    ///
    /// y[i] = 机器 i 档位中满足 y >= l[i] 的最小值
    ///
    /// # 参数
    /// - `total_loads`: 总负载向量 l[1..n]
    /// - `lattice`: 注入的产能格
    ///
    /// # 返回
    /// - Ok(Vec<f64>): 最小容量向量
    /// - Err(EngineError::CapacityExceeded): 某机器无档位满足负载 (指明机器)
    /// - Err(EngineError::InvalidConfiguration): 产能格机器数与负载向量不一致
    pub fn resolve_min_capacities(
        &self,
        total_loads: &[f64],
        lattice: &CapacityLattice,
    ) -> EngineResult<Vec<f64>> {
        if lattice.machine_count() != total_loads.len() {
            return Err(EngineError::InvalidConfiguration {
                field: "capacity_lattice",
                reason: format!(
                    "产能格覆盖{}台机器, 与机器数量{}不一致",
                    lattice.machine_count(),
                    total_loads.len()
                ),
            });
        }

        let mut min_capacities = Vec::with_capacity(total_loads.len());
        for (idx, load) in total_loads.iter().enumerate() {
            let machine_index = idx + 1;
            match lattice.min_level_at_least(machine_index, *load) {
                Some(level) => min_capacities.push(level),
                None => {
                    tracing::warn!(machine_index, load, "无产能档位满足负载");
                    return Err(EngineError::CapacityExceeded {
                        machine_index,
                        required_load: *load,
                    });
                }
            }
        }

        Ok(min_capacities)
    }

    /// 逐机满足概率 Pr{x_i >= y_i}
    ///
    /// # 参数
    /// - `min_capacities`: 最小容量向量 y[1..n]
    /// - `table`: 注入的容量概率表
    ///
    /// # 返回
    /// - Ok(Vec<f64>): 逐机尾概率
    /// - Err(EngineError::InvalidConfiguration): 概率表机器数不一致
    pub fn meet_probabilities(
        &self,
        min_capacities: &[f64],
        table: &CapacityProbabilityTable,
    ) -> EngineResult<Vec<f64>> {
        if table.machine_count() != min_capacities.len() {
            return Err(EngineError::InvalidConfiguration {
                field: "capacity_probability_table",
                reason: format!(
                    "容量概率表覆盖{}台机器, 与机器数量{}不一致",
                    table.machine_count(),
                    min_capacities.len()
                ),
            });
        }

        Ok(min_capacities
            .iter()
            .enumerate()
            .map(|(idx, y)| table.tail_probability(idx + 1, *y))
            .collect())
    }

    /// 容量模型系统可靠度 R_d = ∏ Pr{x_i >= y_i}
    ///
    /// # 参数
    /// - `meet_probabilities`: 逐机尾概率
    pub fn capacity_reliability(&self, meet_probabilities: &[f64]) -> f64 {
        meet_probabilities.iter().product()
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for CapacityPlanner {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::capacity::MachineCapacityDistribution;

    fn create_test_lattice() -> CapacityLattice {
        CapacityLattice::new(vec![
            vec![100.0, 200.0, 300.0],
            vec![100.0, 200.0, 300.0],
            vec![100.0, 200.0, 300.0],
        ])
    }

    fn create_test_table() -> CapacityProbabilityTable {
        CapacityProbabilityTable::new(vec![
            MachineCapacityDistribution {
                levels: vec![100.0, 200.0, 300.0],
                masses: vec![0.1, 0.3, 0.6],
            },
            MachineCapacityDistribution {
                levels: vec![100.0, 200.0, 300.0],
                masses: vec![0.2, 0.3, 0.5],
            },
            MachineCapacityDistribution {
                levels: vec![100.0, 200.0, 300.0],
                masses: vec![0.05, 0.15, 0.8],
            },
        ])
    }

    #[test]
    fn test_resolve_min_capacities() {
        let planner = CapacityPlanner::new();
        let lattice = create_test_lattice();

        let y = planner
            .resolve_min_capacities(&[150.0, 200.0, 290.0], &lattice)
            .unwrap();
        assert_eq!(y, vec![200.0, 200.0, 300.0]);
    }

    #[test]
    fn test_resolve_capacity_exceeded_names_machine() {
        let planner = CapacityPlanner::new();
        let lattice = create_test_lattice();

        match planner.resolve_min_capacities(&[150.0, 200.0, 350.0], &lattice) {
            Err(EngineError::CapacityExceeded {
                machine_index,
                required_load,
            }) => {
                assert_eq!(machine_index, 3);
                assert_eq!(required_load, 350.0);
            }
            other => panic!("期望 CapacityExceeded, 实际 {:?}", other),
        }
    }

    #[test]
    fn test_resolve_lattice_count_mismatch() {
        let planner = CapacityPlanner::new();
        let lattice = create_test_lattice();

        match planner.resolve_min_capacities(&[150.0, 200.0], &lattice) {
            Err(EngineError::InvalidConfiguration { field, .. }) => {
                assert_eq!(field, "capacity_lattice");
            }
            other => panic!("期望 InvalidConfiguration, 实际 {:?}", other),
        }
    }

    #[test]
    fn test_meet_probabilities_and_reliability() {
        let planner = CapacityPlanner::new();
        let table = create_test_table();

        let probs = planner
            .meet_probabilities(&[200.0, 200.0, 300.0], &table)
            .unwrap();
        assert!((probs[0] - 0.9).abs() < 1e-12);
        assert!((probs[1] - 0.8).abs() < 1e-12);
        assert!((probs[2] - 0.8).abs() < 1e-12);

        let r_d = planner.capacity_reliability(&probs);
        assert!((r_d - 0.9 * 0.8 * 0.8).abs() < 1e-12);
        assert!((0.0..=1.0).contains(&r_d));
    }

    #[test]
    fn test_meet_probabilities_table_count_mismatch() {
        let planner = CapacityPlanner::new();
        let table = create_test_table();

        match planner.meet_probabilities(&[200.0], &table) {
            Err(EngineError::InvalidConfiguration { field, .. }) => {
                assert_eq!(field, "capacity_probability_table");
            }
            other => panic!("期望 InvalidConfiguration, 实际 {:?}", other),
        }
    }
}
