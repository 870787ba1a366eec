// ==========================================
// 制造网络可靠度分析系统 - 网络配置领域模型
// ==========================================
// 依据: Lin & Chang (2012) - 串联产线 + 重工子段 [r-k, r]
// ==========================================

use crate::domain::types::ModelVariant;
use serde::{Deserialize, Serialize};

// ==========================================
// NetworkConfig - 制造网络配置
// ==========================================
// 机器编号约定: 业务侧 1..n (a1..an), 向量下标 0..n-1
// 重工子段: [r-k, r], 在机器 r 检验失败的材料回流至机器 r-k
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    // ===== 模型变体 =====
    pub variant: ModelVariant,     // Model I (相同故障率) / Model II (不同故障率)

    // ===== 基本参数 =====
    pub demand: f64,               // 需求数量 d (单位)
    pub machine_count: usize,      // 机器数量 n

    // ===== 重工参数 =====
    pub rework_end: usize,         // 产生缺陷的机器 r (1-based, 2 <= r <= n)
    pub rework_offset: usize,      // 重工回流偏移 k (0 <= k <= r-1)

    // ===== 机器成功率 =====
    pub success_probs: Vec<f64>,   // 成功率向量 p[1..n], 每项属于 (0, 1]
}

impl NetworkConfig {
    /// 构造 Model I 配置 (所有机器相同故障率)
    ///
    /// # 参数
    /// - `demand`: 需求数量 d
    /// - `machine_count`: 机器数量 n
    /// - `rework_end`: 产生缺陷的机器 r (1-based)
    /// - `rework_offset`: 重工回流偏移 k
    /// - `success_prob`: 统一成功率 p, 广播至全部 n 台机器
    pub fn uniform(
        demand: f64,
        machine_count: usize,
        rework_end: usize,
        rework_offset: usize,
        success_prob: f64,
    ) -> Self {
        Self {
            variant: ModelVariant::Uniform,
            demand,
            machine_count,
            rework_end,
            rework_offset,
            success_probs: vec![success_prob; machine_count],
        }
    }

    /// 构造 Model II 配置 (不同机器不同故障率)
    ///
    /// # 参数
    /// - `demand`: 需求数量 d
    /// - `rework_end`: 产生缺陷的机器 r (1-based)
    /// - `rework_offset`: 重工回流偏移 k
    /// - `success_probs`: 逐机成功率向量, 长度即机器数量 n
    pub fn heterogeneous(
        demand: f64,
        rework_end: usize,
        rework_offset: usize,
        success_probs: Vec<f64>,
    ) -> Self {
        Self {
            variant: ModelVariant::Heterogeneous,
            demand,
            machine_count: success_probs.len(),
            rework_end,
            rework_offset,
            success_probs,
        }
    }

    // ==========================================
    // 派生访问器
    // ==========================================

    /// 机器 i 的故障率 q[i] = 1 - p[i]
    ///
    /// # 参数
    /// - `machine_index`: 机器编号 (1-based)
    pub fn failure_prob(&self, machine_index: usize) -> f64 {
        1.0 - self.success_probs[machine_index - 1]
    }

    /// 重工回流入口机器 r-k (1-based)
    pub fn rework_entry(&self) -> usize {
        self.rework_end - self.rework_offset
    }

    /// 机器业务标签 (a1..an)
    ///
    /// # 参数
    /// - `machine_index`: 机器编号 (1-based)
    pub fn machine_label(&self, machine_index: usize) -> String {
        format!("a{}", machine_index)
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_broadcast() {
        let config = NetworkConfig::uniform(150.0, 5, 4, 1, 0.95);

        assert_eq!(config.variant, ModelVariant::Uniform);
        assert_eq!(config.machine_count, 5);
        assert_eq!(config.success_probs, vec![0.95; 5]);
    }

    #[test]
    fn test_heterogeneous_machine_count_from_vector() {
        let config = NetworkConfig::heterogeneous(100.0, 3, 1, vec![0.9, 0.85, 0.99]);

        assert_eq!(config.variant, ModelVariant::Heterogeneous);
        assert_eq!(config.machine_count, 3);
    }

    #[test]
    fn test_failure_prob() {
        let config = NetworkConfig::heterogeneous(100.0, 3, 1, vec![0.9, 0.85, 0.99]);

        assert!((config.failure_prob(1) - 0.1).abs() < 1e-12);
        assert!((config.failure_prob(2) - 0.15).abs() < 1e-12);
    }

    #[test]
    fn test_rework_entry() {
        // r=4, k=1 => 回流入口为 a3
        let config = NetworkConfig::uniform(150.0, 5, 4, 1, 0.95);
        assert_eq!(config.rework_entry(), 3);

        // k=0 => 仅机器 r 自身重做
        let config = NetworkConfig::uniform(150.0, 5, 4, 0, 0.95);
        assert_eq!(config.rework_entry(), 4);
    }

    #[test]
    fn test_machine_label() {
        let config = NetworkConfig::uniform(150.0, 5, 4, 1, 0.95);
        assert_eq!(config.machine_label(1), "a1");
        assert_eq!(config.machine_label(5), "a5");
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = NetworkConfig::heterogeneous(150.0, 4, 1, vec![0.95, 0.9, 0.85, 0.8, 0.99]);
        let json = serde_json::to_string(&config).unwrap();
        let parsed: NetworkConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, config);
    }
}
