// ==========================================
// 制造网络可靠度分析系统 - API 数据传输对象
// ==========================================
// 职责: 请求/响应 DTO 定义, 供展示层序列化
// 红线: 两种可靠度语义分列字段, 指导文案附带判定依据
// ==========================================

use crate::domain::capacity::{CapacityLattice, CapacityProbabilityTable};
use crate::domain::types::{AvailabilityLevel, ModelVariant};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// AnalysisRequest - 可靠度分析请求
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    // ===== 模型变体 =====
    pub variant: ModelVariant,

    // ===== 基本参数 =====
    pub demand: f64,          // 需求数量 d
    pub machine_count: usize, // 机器数量 n

    // ===== 重工参数 =====
    pub rework_end: usize,    // 产生缺陷的机器 r (1-based)
    pub rework_offset: usize, // 重工回流偏移 k

    // ===== 机器成功率 (按变体二选一) =====
    pub uniform_success_prob: Option<f64>,  // Model I: 统一成功率
    pub success_probs: Option<Vec<f64>>,    // Model II: 逐机成功率

    // ===== 产能注入 (可选) =====
    pub capacity_lattice: Option<CapacityLattice>,
    pub capacity_table: Option<CapacityProbabilityTable>,
}

// ==========================================
// MachineFlowRow - 逐机流量展示行
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineFlowRow {
    pub machine_label: String,         // a1..an
    pub success_prob: f64,             // p[i]
    pub failure_prob: f64,             // q[i]
    pub general_flow: f64,             // f_G[i]
    pub rework_flow: f64,              // f_R[i]
    pub total_load: f64,               // l[i]
    pub min_capacity: Option<f64>,     // y[i]
    pub meet_probability: Option<f64>, // Pr{x_i >= y_i}
}

// ==========================================
// GuidanceDto - 优化建议
// ==========================================
// basis 取值: CAPACITY_MODEL (容量模型 R_d) / SERIES_APPROX (串联近似)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuidanceDto {
    pub availability_level: AvailabilityLevel,
    pub basis: String,           // 判定依据的可靠度语义
    pub basis_reliability: f64,  // 判定所用的可靠度数值
    pub headline: String,        // 结论文案
    pub suggestions: Vec<String>, // 改进措施清单
}

// ==========================================
// AnalysisResponse - 可靠度分析响应
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    // ===== 标识 =====
    pub analysis_id: String,        // 本次分析ID (uuid)
    pub generated_at: NaiveDateTime, // 生成时间 (UTC)

    // ===== 系统参数回显 =====
    pub variant: ModelVariant,
    pub demand: f64,
    pub machine_count: usize,
    pub rework_entry_label: String, // 重工起始点 a{r-k}
    pub rework_end_label: String,   // 重工结束点 a{r}

    // ===== 计算结果 =====
    pub input_quantity: f64,            // 需投入材料数量 I
    pub machine_rows: Vec<MachineFlowRow>,
    pub series_reliability: f64,            // 串联近似 ∏ p[i]
    pub capacity_reliability: Option<f64>,  // 容量模型 R_d

    // ===== 展示指导 =====
    pub guidance: GuidanceDto,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serde_roundtrip() {
        let request = AnalysisRequest {
            variant: ModelVariant::Uniform,
            demand: 150.0,
            machine_count: 5,
            rework_end: 4,
            rework_offset: 1,
            uniform_success_prob: Some(0.95),
            success_probs: None,
            capacity_lattice: None,
            capacity_table: None,
        };

        let json = serde_json::to_string(&request).unwrap();
        let parsed: AnalysisRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.demand, request.demand);
        assert_eq!(parsed.variant, request.variant);
        assert_eq!(parsed.uniform_success_prob, request.uniform_success_prob);
    }
}
