// ==========================================
// 制造网络可靠度分析系统 - 引擎层错误类型
// ==========================================
// 职责: 定义引擎错误类型, 所有错误必须指明违规字段或机器
// 红线: 要么产出完整报告, 要么返回具体错误, 无部分结果
// ==========================================

use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// 配置形状或取值非法 (调用方错误, 立即返回, 不重试)
    #[error("无效配置: field={field}, {reason}")]
    InvalidConfiguration { field: &'static str, reason: String },

    /// 数学上无定义的结果 (投料分母非正或非有限)
    #[error("退化网络: 投料分母非正, denominator={denominator}")]
    DegenerateNetwork { denominator: f64 },

    /// 某机器无任何产能档位满足负载 (逐机报告, 不影响其他配置的评估)
    #[error("产能不足: machine=a{machine_index}, required_load={required_load}")]
    CapacityExceeded {
        machine_index: usize,
        required_load: f64,
    },
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_offender() {
        let err = EngineError::InvalidConfiguration {
            field: "demand",
            reason: "需求数量必须为正".to_string(),
        };
        assert!(err.to_string().contains("demand"));

        let err = EngineError::CapacityExceeded {
            machine_index: 3,
            required_load: 181.5,
        };
        assert!(err.to_string().contains("a3"));
    }
}
