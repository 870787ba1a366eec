// ==========================================
// 制造网络可靠度分析系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 数据映射错误 =====
    #[error("字段映射失败 (行 {row}): {message}")]
    FieldMappingError { row: usize, message: String },

    #[error("类型转换失败 (行 {row}, 字段 {field}): {message}")]
    TypeConversionError {
        row: usize,
        field: String,
        message: String,
    },

    // ===== 数据质量错误 =====
    #[error("机器序号错误 (行 {row}): 期望 {expected}, 实际 {actual}")]
    MachineSequenceError {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("数值范围错误 (行 {row}, 字段 {field}): 值 {value} 超出范围 ({min}, {max}]")]
    ValueRangeError {
        row: usize,
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("档位与概率质量不对齐 (行 {row}): 档位 {levels} 项, 质量 {masses} 项")]
    CapacityAlignmentError {
        row: usize,
        levels: usize,
        masses: usize,
    },

    #[error("概率质量和偏离 1 (行 {row}): 实际 {sum}")]
    MassSumError { row: usize, sum: f64 },

    #[error("文件无有效数据行")]
    EmptyFile,

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
