// ==========================================
// 制造网络可靠度分析系统 - 产能领域模型
// ==========================================
// 依据: Lin & Chang (2012) - 离散产能格与容量分布表
// ==========================================
// 红线: 产能档位与分布表均为外部注入,系统不硬编码任何格点
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// CapacityLattice - 产能格
// ==========================================
// 用途: 每台机器可供选择的离散产能档位 (升序)
// 最小容量向量 y 从此格中取 "最小的满足档位"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityLattice {
    // 每台机器一组档位, 下标 0..n-1 对应机器 a1..an
    pub levels: Vec<Vec<f64>>,
}

impl CapacityLattice {
    /// 构造产能格
    ///
    /// # 参数
    /// - `levels`: 每台机器的离散产能档位
    pub fn new(levels: Vec<Vec<f64>>) -> Self {
        Self { levels }
    }

    /// 覆盖的机器数量
    pub fn machine_count(&self) -> usize {
        self.levels.len()
    }

    /// 最小满足档位: 机器 i 档位中满足 level >= load 的最小值
    ///
    /// # 参数
    /// - `machine_index`: 机器编号 (1-based)
    /// - `load`: 该机器的总负载 l[i]
    ///
    /// # 返回
    /// - `Some(level)`: 最小满足档位
    /// - `None`: 无任何档位满足负载
    pub fn min_level_at_least(&self, machine_index: usize, load: f64) -> Option<f64> {
        self.levels[machine_index - 1]
            .iter()
            .copied()
            .filter(|level| *level >= load)
            .fold(None, |best, level| match best {
                Some(b) if b <= level => Some(b),
                _ => Some(level),
            })
    }
}

// ==========================================
// MachineCapacityDistribution - 单机容量分布
// ==========================================
// 用途: 机器实际产能 x_i 的离散分布 (档位, 概率质量)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineCapacityDistribution {
    pub levels: Vec<f64>, // 档位
    pub masses: Vec<f64>, // 对应概率质量, 与 levels 等长
}

impl MachineCapacityDistribution {
    /// 尾概率 Pr{x >= y}
    ///
    /// # 参数
    /// - `y`: 最小容量要求
    ///
    /// # 返回
    /// 档位不低于 y 的概率质量之和
    pub fn tail_probability(&self, y: f64) -> f64 {
        self.levels
            .iter()
            .zip(self.masses.iter())
            .filter(|(level, _)| **level >= y)
            .map(|(_, mass)| *mass)
            .sum()
    }
}

// ==========================================
// CapacityProbabilityTable - 容量概率表
// ==========================================
// 用途: 逐机容量分布, 系统可靠度 R_d = ∏ Pr{x_i >= y_i}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityProbabilityTable {
    // 下标 0..n-1 对应机器 a1..an
    pub machines: Vec<MachineCapacityDistribution>,
}

impl CapacityProbabilityTable {
    /// 构造容量概率表
    pub fn new(machines: Vec<MachineCapacityDistribution>) -> Self {
        Self { machines }
    }

    /// 覆盖的机器数量
    pub fn machine_count(&self) -> usize {
        self.machines.len()
    }

    /// 机器 i 的尾概率 Pr{x_i >= y}
    ///
    /// # 参数
    /// - `machine_index`: 机器编号 (1-based)
    /// - `y`: 最小容量要求
    pub fn tail_probability(&self, machine_index: usize, y: f64) -> f64 {
        self.machines[machine_index - 1].tail_probability(y)
    }

    /// 以分布支撑集作为产能格
    ///
    /// 未显式注入产能格时, 机器能呈现的档位即其分布的支撑集
    pub fn support_lattice(&self) -> CapacityLattice {
        CapacityLattice::new(
            self.machines
                .iter()
                .map(|dist| dist.levels.clone())
                .collect(),
        )
    }
}
