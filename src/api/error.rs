// ==========================================
// 制造网络可靠度分析系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型, 转换引擎/导入层错误为用户友好的错误消息
// 红线: 所有错误信息必须包含显式原因 (可解释性)
// ==========================================

use crate::engine::error::EngineError;
use crate::importer::error::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 请求校验错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    /// 请求校验失败 (带逐项违规详情)
    #[error("请求校验失败: {reason}")]
    RequestValidationError {
        reason: String,
        violations: Vec<ValidationViolation>,
    },

    // ==========================================
    // 引擎错误
    // ==========================================
    #[error("无效配置: field={field}, {reason}")]
    InvalidConfiguration { field: &'static str, reason: String },

    #[error("退化网络: 投料分母非正, denominator={denominator}")]
    DegenerateNetwork { denominator: f64 },

    #[error("产能不足: machine=a{machine_index}, required_load={required_load}")]
    CapacityExceeded {
        machine_index: usize,
        required_load: f64,
    },

    // ==========================================
    // 导入错误
    // ==========================================
    #[error("文件导入失败: {0}")]
    ImportError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从 EngineError 转换
// 目的: 将引擎层的计算错误逐变体映射, 保留违规字段/机器信息
// ==========================================
impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::InvalidConfiguration { field, reason } => {
                ApiError::InvalidConfiguration { field, reason }
            }
            EngineError::DegenerateNetwork { denominator } => {
                ApiError::DegenerateNetwork { denominator }
            }
            EngineError::CapacityExceeded {
                machine_index,
                required_load,
            } => ApiError::CapacityExceeded {
                machine_index,
                required_load,
            },
        }
    }
}

// ==========================================
// 从 ImportError 转换
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        ApiError::ImportError(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

// ==========================================
// 校验违规详情
// ==========================================

/// 校验违规详情
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ValidationViolation {
    /// 违规类型 (FIELD_RANGE / FIELD_SHAPE / REWORK_RANGE)
    pub violation_type: String,
    /// 违规字段
    pub field: String,
    /// 违规原因
    pub reason: String,
    /// 额外信息 (可选)
    pub details: Option<serde_json::Value>,
}
