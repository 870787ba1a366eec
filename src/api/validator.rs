// ==========================================
// 制造网络可靠度分析系统 - 分析请求校验器
// ==========================================
// 职责: 在构造 NetworkConfig 之前校验原始请求
// 红线: 一次性收集全部违规, 每条指明字段与原因 (可解释性)
// ==========================================

use serde_json::json;

use crate::api::dto::AnalysisRequest;
use crate::api::error::{ApiError, ApiResult, ValidationViolation};
use crate::domain::types::ModelVariant;

// ==========================================
// AnalysisRequestValidator - 分析请求校验器
// ==========================================
pub struct AnalysisRequestValidator;

impl AnalysisRequestValidator {
    /// 构造函数
    pub fn new() -> Self {
        Self
    }

    /// 校验分析请求
    ///
    /// # 参数
    /// - `request`: 原始分析请求
    ///
    /// # 返回
    /// - Ok(()): 校验通过
    /// - Err(ApiError::RequestValidationError): 携带全部违规详情
    pub fn validate(&self, request: &AnalysisRequest) -> ApiResult<()> {
        let mut violations = Vec::new();

        self.check_basic_fields(request, &mut violations);
        self.check_rework_range(request, &mut violations);
        self.check_probabilities(request, &mut violations);
        self.check_capacity_inputs(request, &mut violations);

        if !violations.is_empty() {
            return Err(ApiError::RequestValidationError {
                reason: format!("{}项参数违规", violations.len()),
                violations,
            });
        }

        Ok(())
    }

    // ==========================================
    // 分项校验
    // ==========================================

    /// 基本参数: 需求与机器数量
    fn check_basic_fields(
        &self,
        request: &AnalysisRequest,
        violations: &mut Vec<ValidationViolation>,
    ) {
        if !request.demand.is_finite() || request.demand <= 0.0 {
            violations.push(ValidationViolation {
                violation_type: "FIELD_RANGE".to_string(),
                field: "demand".to_string(),
                reason: format!("需求数量必须为正且有限, 实际为{}", request.demand),
                details: None,
            });
        }

        if request.machine_count < 1 {
            violations.push(ValidationViolation {
                violation_type: "FIELD_RANGE".to_string(),
                field: "machine_count".to_string(),
                reason: "机器数量必须为正".to_string(),
                details: None,
            });
        }
    }

    /// 重工参数: 2 <= r <= n, 0 <= k <= r-1
    fn check_rework_range(
        &self,
        request: &AnalysisRequest,
        violations: &mut Vec<ValidationViolation>,
    ) {
        if request.rework_end < 2 || request.rework_end > request.machine_count {
            violations.push(ValidationViolation {
                violation_type: "REWORK_RANGE".to_string(),
                field: "rework_end".to_string(),
                reason: format!(
                    "重工检验机器r={}必须满足 2 <= r <= n={}",
                    request.rework_end, request.machine_count
                ),
                details: Some(json!({
                    "rework_end": request.rework_end,
                    "machine_count": request.machine_count,
                })),
            });
        } else if request.rework_offset > request.rework_end - 1 {
            violations.push(ValidationViolation {
                violation_type: "REWORK_RANGE".to_string(),
                field: "rework_offset".to_string(),
                reason: format!(
                    "重工回流偏移k={}必须满足 0 <= k <= r-1={}",
                    request.rework_offset,
                    request.rework_end - 1
                ),
                details: None,
            });
        }
    }

    /// 成功率: 按模型变体二选一, 取值属于 (0, 1]
    fn check_probabilities(
        &self,
        request: &AnalysisRequest,
        violations: &mut Vec<ValidationViolation>,
    ) {
        match request.variant {
            ModelVariant::Uniform => match request.uniform_success_prob {
                None => violations.push(ValidationViolation {
                    violation_type: "FIELD_SHAPE".to_string(),
                    field: "uniform_success_prob".to_string(),
                    reason: "Model I 必须提供统一成功率".to_string(),
                    details: None,
                }),
                Some(p) if !p.is_finite() || p <= 0.0 || p > 1.0 => {
                    violations.push(ValidationViolation {
                        violation_type: "FIELD_RANGE".to_string(),
                        field: "uniform_success_prob".to_string(),
                        reason: format!("成功率{}不在(0,1]区间", p),
                        details: None,
                    });
                }
                Some(_) => {}
            },
            ModelVariant::Heterogeneous => match &request.success_probs {
                None => violations.push(ValidationViolation {
                    violation_type: "FIELD_SHAPE".to_string(),
                    field: "success_probs".to_string(),
                    reason: "Model II 必须提供逐机成功率向量".to_string(),
                    details: None,
                }),
                Some(probs) => {
                    if probs.len() != request.machine_count {
                        violations.push(ValidationViolation {
                            violation_type: "FIELD_SHAPE".to_string(),
                            field: "success_probs".to_string(),
                            reason: format!(
                                "成功率向量长度{}与机器数量{}不一致",
                                probs.len(),
                                request.machine_count
                            ),
                            details: None,
                        });
                    }
                    for (idx, p) in probs.iter().enumerate() {
                        if !p.is_finite() || *p <= 0.0 || *p > 1.0 {
                            violations.push(ValidationViolation {
                                violation_type: "FIELD_RANGE".to_string(),
                                field: "success_probs".to_string(),
                                reason: format!("机器a{}成功率{}不在(0,1]区间", idx + 1, p),
                                details: Some(json!({ "machine_index": idx + 1 })),
                            });
                        }
                    }
                }
            },
        }
    }

    /// 产能注入: 覆盖机器数必须与 n 一致
    fn check_capacity_inputs(
        &self,
        request: &AnalysisRequest,
        violations: &mut Vec<ValidationViolation>,
    ) {
        if let Some(lattice) = &request.capacity_lattice {
            if lattice.machine_count() != request.machine_count {
                violations.push(ValidationViolation {
                    violation_type: "FIELD_SHAPE".to_string(),
                    field: "capacity_lattice".to_string(),
                    reason: format!(
                        "产能格覆盖{}台机器, 与机器数量{}不一致",
                        lattice.machine_count(),
                        request.machine_count
                    ),
                    details: None,
                });
            }
        }

        if let Some(table) = &request.capacity_table {
            if table.machine_count() != request.machine_count {
                violations.push(ValidationViolation {
                    violation_type: "FIELD_SHAPE".to_string(),
                    field: "capacity_table".to_string(),
                    reason: format!(
                        "容量概率表覆盖{}台机器, 与机器数量{}不一致",
                        table.machine_count(),
                        request.machine_count
                    ),
                    details: None,
                });
            }
        }
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for AnalysisRequestValidator {
    fn default() -> Self {
        Self::new()
    }
}
