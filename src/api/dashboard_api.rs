// ==========================================
// 制造网络可靠度分析系统 - 驾驶舱 API
// ==========================================
// 职责: 封装可靠度引擎, 为驾驶舱提供聚合分析接口与优化建议
// 架构: API 层 → 引擎层 (ReliabilityEngine)
// ==========================================
// 展示策略: 注入容量概率表时以容量模型 R_d 为判定依据,
//           否则回退到串联近似 ∏ p[i]; 依据随文案一并输出
// ==========================================

use chrono::Utc;
use uuid::Uuid;

use crate::api::dto::{AnalysisRequest, AnalysisResponse, GuidanceDto, MachineFlowRow};
use crate::api::error::ApiResult;
use crate::api::validator::AnalysisRequestValidator;
use crate::domain::network::NetworkConfig;
use crate::domain::report::ReliabilityReport;
use crate::domain::types::{AvailabilityLevel, ModelVariant};
use crate::engine::reliability::ReliabilityEngine;
use crate::i18n::t;

// ==========================================
// DashboardApi - 驾驶舱 API
// ==========================================

/// 驾驶舱API
///
/// 职责：
/// 1. 校验原始分析请求
/// 2. 构造网络配置并调用可靠度引擎
/// 3. 组装展示响应 (指标 + 逐机表格 + 优化建议)
pub struct DashboardApi {
    engine: ReliabilityEngine,
    validator: AnalysisRequestValidator,
}

impl DashboardApi {
    /// 创建新的DashboardApi实例
    pub fn new() -> Self {
        Self {
            engine: ReliabilityEngine::new(),
            validator: AnalysisRequestValidator::new(),
        }
    }

    // ==========================================
    // 核心接口
    // ==========================================

    /// 执行可靠度分析
    ///
    /// # 参数
    /// - `request`: 分析请求
    ///
    /// # 返回
    /// - Ok(AnalysisResponse): 聚合分析响应
    /// - Err(ApiError): 请求违规或引擎错误
    pub fn analyze(&self, request: &AnalysisRequest) -> ApiResult<AnalysisResponse> {
        self.validator.validate(request)?;

        let config = self.build_config(request);
        let report = self.engine.compute(
            &config,
            request.capacity_lattice.as_ref(),
            request.capacity_table.as_ref(),
        )?;

        tracing::info!(
            variant = %config.variant,
            machine_count = config.machine_count,
            series_reliability = report.series_reliability,
            capacity_reliability = report.capacity_reliability,
            "可靠度分析完成"
        );

        Ok(self.build_response(&config, report))
    }

    // ==========================================
    // 响应组装
    // ==========================================

    /// 从已校验的请求构造网络配置
    fn build_config(&self, request: &AnalysisRequest) -> NetworkConfig {
        match request.variant {
            ModelVariant::Uniform => NetworkConfig::uniform(
                request.demand,
                request.machine_count,
                request.rework_end,
                request.rework_offset,
                request.uniform_success_prob.unwrap_or(0.0),
            ),
            ModelVariant::Heterogeneous => NetworkConfig::heterogeneous(
                request.demand,
                request.rework_end,
                request.rework_offset,
                request.success_probs.clone().unwrap_or_default(),
            ),
        }
    }

    /// 组装分析响应
    fn build_response(
        &self,
        config: &NetworkConfig,
        report: ReliabilityReport,
    ) -> AnalysisResponse {
        let machine_rows = report
            .machine_flows
            .iter()
            .map(|flow| MachineFlowRow {
                machine_label: flow.machine_label.clone(),
                success_prob: flow.success_prob,
                failure_prob: flow.failure_prob,
                general_flow: flow.general_flow,
                rework_flow: flow.rework_flow,
                total_load: flow.total_load,
                min_capacity: flow.min_capacity,
                meet_probability: flow.meet_probability,
            })
            .collect();

        let guidance = self.build_guidance(&report);

        AnalysisResponse {
            analysis_id: Uuid::new_v4().to_string(),
            generated_at: Utc::now().naive_utc(),
            variant: config.variant,
            demand: config.demand,
            machine_count: config.machine_count,
            rework_entry_label: config.machine_label(config.rework_entry()),
            rework_end_label: config.machine_label(config.rework_end),
            input_quantity: report.input_quantity,
            machine_rows,
            series_reliability: report.series_reliability,
            capacity_reliability: report.capacity_reliability,
            guidance,
        }
    }

    /// 生成优化建议
    ///
    /// 规则 (可解释):
    /// - 可靠度 > 0.9: 良好, 无改进清单
    /// - 可靠度 > 0.7: 中等, 维护/容量/重工路径三项建议
    /// - 其余: 较低, 升级/重设计/冗余三项建议
    fn build_guidance(&self, report: &ReliabilityReport) -> GuidanceDto {
        // 判定依据: 容量模型优先, 缺省回退串联近似
        let (basis_reliability, basis) = match report.capacity_reliability {
            Some(r_d) => (r_d, t("guidance.basis.capacity")),
            None => (report.series_reliability, t("guidance.basis.series")),
        };

        let availability_level = AvailabilityLevel::from_reliability(basis_reliability);

        let (headline, suggestions) = match availability_level {
            AvailabilityLevel::High => (t("guidance.good.headline"), Vec::new()),
            AvailabilityLevel::Medium => (
                t("guidance.moderate.headline"),
                vec![
                    t("guidance.moderate.s1"),
                    t("guidance.moderate.s2"),
                    t("guidance.moderate.s3"),
                ],
            ),
            AvailabilityLevel::Low => (
                t("guidance.poor.headline"),
                vec![
                    t("guidance.poor.s1"),
                    t("guidance.poor.s2"),
                    t("guidance.poor.s3"),
                ],
            ),
        };

        GuidanceDto {
            availability_level,
            basis,
            basis_reliability,
            headline,
            suggestions,
        }
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for DashboardApi {
    fn default() -> Self {
        Self::new()
    }
}
