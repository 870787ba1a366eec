// ==========================================
// 制造网络可靠度分析系统 - 机器参数导入器
// ==========================================
// 职责: 从 CSV 导入逐机成功率与可选产能档位/容量分布
// 文件格式: machine_seq,success_prob[,capacity_levels,capacity_probs]
//           档位/质量列表以分号分隔, 两列须逐行对齐
// 红线: 产能列全有或全无, 概率质量和须为 1 (容差 1e-6)
// ==========================================

use std::path::Path;

use crate::domain::capacity::{
    CapacityLattice, CapacityProbabilityTable, MachineCapacityDistribution,
};
use crate::importer::error::{ImportError, ImportResult};

// 概率质量和的容差
const MASS_SUM_TOLERANCE: f64 = 1e-6;

// ==========================================
// MachineParamImport - 导入结果
// ==========================================
#[derive(Debug, Clone)]
pub struct MachineParamImport {
    pub success_probs: Vec<f64>,                         // 逐机成功率 p[1..n]
    pub capacity_lattice: Option<CapacityLattice>,       // 产能格 (全部行提供档位时)
    pub capacity_table: Option<CapacityProbabilityTable>, // 容量概率表 (全部行提供质量时)
}

// ==========================================
// MachineParamImporter - 机器参数导入器
// ==========================================
pub struct MachineParamImporter;

impl MachineParamImporter {
    /// 构造函数
    pub fn new() -> Self {
        Self
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 从 CSV 文件导入机器参数
    ///
    /// # 参数
    /// - `path`: CSV 文件路径
    ///
    /// # 返回
    /// - Ok(MachineParamImport): 成功率向量 + 可选产能注入
    /// - Err(ImportError): 文件/映射/数据质量错误 (指明行号与字段)
    pub fn import_from_csv(&self, path: &Path) -> ImportResult<MachineParamImport> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)?;

        let mut success_probs = Vec::new();
        let mut level_rows: Vec<Option<Vec<f64>>> = Vec::new();
        let mut mass_rows: Vec<Option<Vec<f64>>> = Vec::new();

        for (idx, record) in reader.records().enumerate() {
            let record = record?;
            // 行号含标题行, 数据首行为第 2 行
            let row = idx + 2;

            let seq = parse_usize(&record, row, 0, "machine_seq")?;
            if seq != idx + 1 {
                return Err(ImportError::MachineSequenceError {
                    row,
                    expected: idx + 1,
                    actual: seq,
                });
            }

            let p = parse_f64(&record, row, 1, "success_prob")?;
            if !p.is_finite() || p <= 0.0 || p > 1.0 {
                return Err(ImportError::ValueRangeError {
                    row,
                    field: "success_prob".to_string(),
                    value: p,
                    min: 0.0,
                    max: 1.0,
                });
            }
            success_probs.push(p);

            let levels = parse_optional_list(&record, row, 2, "capacity_levels")?;
            let masses = parse_optional_list(&record, row, 3, "capacity_probs")?;
            self.check_capacity_columns(row, &levels, &masses)?;

            level_rows.push(levels);
            mass_rows.push(masses);
        }

        if success_probs.is_empty() {
            return Err(ImportError::EmptyFile);
        }

        let capacity_lattice = collect_uniform_coverage(&level_rows, "capacity_levels")?
            .map(CapacityLattice::new);
        let capacity_table = match collect_uniform_coverage(&mass_rows, "capacity_probs")? {
            Some(masses) => {
                // 质量列存在时档位列必然存在 (逐行已校验)
                let levels = capacity_lattice
                    .as_ref()
                    .map(|lat| lat.levels.clone())
                    .ok_or_else(|| ImportError::InternalError(
                        "容量质量列存在但档位列缺失".to_string(),
                    ))?;
                let machines = levels
                    .into_iter()
                    .zip(masses)
                    .map(|(levels, masses)| MachineCapacityDistribution { levels, masses })
                    .collect();
                Some(CapacityProbabilityTable::new(machines))
            }
            None => None,
        };

        tracing::info!(
            machine_count = success_probs.len(),
            has_lattice = capacity_lattice.is_some(),
            has_table = capacity_table.is_some(),
            "机器参数导入完成"
        );

        Ok(MachineParamImport {
            success_probs,
            capacity_lattice,
            capacity_table,
        })
    }

    // ==========================================
    // 数据质量校验
    // ==========================================

    /// 单行产能列校验: 对齐 / 取值 / 质量和
    fn check_capacity_columns(
        &self,
        row: usize,
        levels: &Option<Vec<f64>>,
        masses: &Option<Vec<f64>>,
    ) -> ImportResult<()> {
        if let Some(levels) = levels {
            for level in levels {
                if !level.is_finite() || *level <= 0.0 {
                    return Err(ImportError::ValueRangeError {
                        row,
                        field: "capacity_levels".to_string(),
                        value: *level,
                        min: 0.0,
                        max: f64::INFINITY,
                    });
                }
            }
        }

        if let Some(masses) = masses {
            let levels = levels.as_ref().ok_or(ImportError::CapacityAlignmentError {
                row,
                levels: 0,
                masses: masses.len(),
            })?;
            if levels.len() != masses.len() {
                return Err(ImportError::CapacityAlignmentError {
                    row,
                    levels: levels.len(),
                    masses: masses.len(),
                });
            }

            for mass in masses {
                if !mass.is_finite() || *mass < 0.0 || *mass > 1.0 {
                    return Err(ImportError::ValueRangeError {
                        row,
                        field: "capacity_probs".to_string(),
                        value: *mass,
                        min: 0.0,
                        max: 1.0,
                    });
                }
            }

            let sum: f64 = masses.iter().sum();
            if (sum - 1.0).abs() > MASS_SUM_TOLERANCE {
                return Err(ImportError::MassSumError { row, sum });
            }
        }

        Ok(())
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for MachineParamImporter {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 字段解析辅助
// ==========================================

/// 取必填字段文本
fn get_field<'a>(
    record: &'a csv::StringRecord,
    row: usize,
    col: usize,
    field: &str,
) -> ImportResult<&'a str> {
    match record.get(col) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ImportError::FieldMappingError {
            row,
            message: format!("缺少字段 {}", field),
        }),
    }
}

/// 解析 usize 字段
fn parse_usize(
    record: &csv::StringRecord,
    row: usize,
    col: usize,
    field: &str,
) -> ImportResult<usize> {
    let raw = get_field(record, row, col, field)?;
    raw.parse::<usize>()
        .map_err(|e| ImportError::TypeConversionError {
            row,
            field: field.to_string(),
            message: format!("{}: {}", raw, e),
        })
}

/// 解析 f64 字段
fn parse_f64(
    record: &csv::StringRecord,
    row: usize,
    col: usize,
    field: &str,
) -> ImportResult<f64> {
    let raw = get_field(record, row, col, field)?;
    raw.parse::<f64>()
        .map_err(|e| ImportError::TypeConversionError {
            row,
            field: field.to_string(),
            message: format!("{}: {}", raw, e),
        })
}

/// 解析可选的分号分隔数值列表 (空白或缺列视为 None)
fn parse_optional_list(
    record: &csv::StringRecord,
    row: usize,
    col: usize,
    field: &str,
) -> ImportResult<Option<Vec<f64>>> {
    let raw = match record.get(col) {
        Some(value) if !value.is_empty() => value,
        _ => return Ok(None),
    };

    let values = raw
        .split(';')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|e| ImportError::TypeConversionError {
                    row,
                    field: field.to_string(),
                    message: format!("{}: {}", part, e),
                })
        })
        .collect::<ImportResult<Vec<f64>>>()?;

    Ok(Some(values))
}

/// 产能列覆盖一致性: 全部行提供才生效, 混合覆盖视为映射错误
fn collect_uniform_coverage(
    rows: &[Option<Vec<f64>>],
    field: &str,
) -> ImportResult<Option<Vec<Vec<f64>>>> {
    let provided = rows.iter().filter(|r| r.is_some()).count();
    if provided == 0 {
        return Ok(None);
    }
    if provided != rows.len() {
        let first_missing = rows.iter().position(|r| r.is_none()).unwrap_or(0);
        return Err(ImportError::FieldMappingError {
            row: first_missing + 2,
            message: format!("字段 {} 须全部行提供或全部行留空", field),
        });
    }
    Ok(Some(
        rows.iter().map(|r| r.clone().unwrap_or_default()).collect(),
    ))
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("创建临时文件失败");
        file.write_all(content.as_bytes()).expect("写入临时文件失败");
        file.flush().expect("刷新临时文件失败");
        file
    }

    #[test]
    fn test_import_probabilities_only() {
        let file = write_csv(
            "machine_seq,success_prob\n\
             1,0.95\n\
             2,0.9\n\
             3,0.85\n",
        );

        let importer = MachineParamImporter::new();
        let result = importer.import_from_csv(file.path()).unwrap();

        assert_eq!(result.success_probs, vec![0.95, 0.9, 0.85]);
        assert!(result.capacity_lattice.is_none());
        assert!(result.capacity_table.is_none());
    }

    #[test]
    fn test_import_with_capacity_columns() {
        let file = write_csv(
            "machine_seq,success_prob,capacity_levels,capacity_probs\n\
             1,0.95,100;200;300,0.1;0.3;0.6\n\
             2,0.9,150;250,0.4;0.6\n",
        );

        let importer = MachineParamImporter::new();
        let result = importer.import_from_csv(file.path()).unwrap();

        let lattice = result.capacity_lattice.unwrap();
        assert_eq!(lattice.levels[0], vec![100.0, 200.0, 300.0]);
        assert_eq!(lattice.levels[1], vec![150.0, 250.0]);

        let table = result.capacity_table.unwrap();
        assert!((table.tail_probability(1, 200.0) - 0.9).abs() < 1e-12);
        assert!((table.tail_probability(2, 250.0) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_missing_file() {
        let importer = MachineParamImporter::new();
        match importer.import_from_csv(Path::new("/nonexistent/machines.csv")) {
            Err(ImportError::FileNotFound(path)) => assert!(path.contains("machines.csv")),
            other => panic!("期望 FileNotFound, 实际 {:?}", other.err()),
        }
    }

    #[test]
    fn test_bad_sequence() {
        let file = write_csv(
            "machine_seq,success_prob\n\
             1,0.95\n\
             3,0.9\n",
        );

        let importer = MachineParamImporter::new();
        match importer.import_from_csv(file.path()) {
            Err(ImportError::MachineSequenceError { row, expected, actual }) => {
                assert_eq!(row, 3);
                assert_eq!(expected, 2);
                assert_eq!(actual, 3);
            }
            other => panic!("期望 MachineSequenceError, 实际 {:?}", other.err()),
        }
    }

    #[test]
    fn test_probability_out_of_range() {
        let file = write_csv(
            "machine_seq,success_prob\n\
             1,1.2\n",
        );

        let importer = MachineParamImporter::new();
        match importer.import_from_csv(file.path()) {
            Err(ImportError::ValueRangeError { row, field, .. }) => {
                assert_eq!(row, 2);
                assert_eq!(field, "success_prob");
            }
            other => panic!("期望 ValueRangeError, 实际 {:?}", other.err()),
        }
    }

    #[test]
    fn test_capacity_misalignment() {
        let file = write_csv(
            "machine_seq,success_prob,capacity_levels,capacity_probs\n\
             1,0.95,100;200;300,0.5;0.5\n",
        );

        let importer = MachineParamImporter::new();
        match importer.import_from_csv(file.path()) {
            Err(ImportError::CapacityAlignmentError { row, levels, masses }) => {
                assert_eq!(row, 2);
                assert_eq!(levels, 3);
                assert_eq!(masses, 2);
            }
            other => panic!("期望 CapacityAlignmentError, 实际 {:?}", other.err()),
        }
    }

    #[test]
    fn test_mass_sum_deviation() {
        let file = write_csv(
            "machine_seq,success_prob,capacity_levels,capacity_probs\n\
             1,0.95,100;200,0.5;0.6\n",
        );

        let importer = MachineParamImporter::new();
        match importer.import_from_csv(file.path()) {
            Err(ImportError::MassSumError { row, sum }) => {
                assert_eq!(row, 2);
                assert!((sum - 1.1).abs() < 1e-12);
            }
            other => panic!("期望 MassSumError, 实际 {:?}", other.err()),
        }
    }

    #[test]
    fn test_mixed_capacity_coverage_rejected() {
        let file = write_csv(
            "machine_seq,success_prob,capacity_levels,capacity_probs\n\
             1,0.95,100;200,0.5;0.5\n\
             2,0.9,,\n",
        );

        let importer = MachineParamImporter::new();
        match importer.import_from_csv(file.path()) {
            Err(ImportError::FieldMappingError { row, message }) => {
                assert_eq!(row, 3);
                assert!(message.contains("capacity_levels"));
            }
            other => panic!("期望 FieldMappingError, 实际 {:?}", other.err()),
        }
    }

    #[test]
    fn test_empty_file() {
        let file = write_csv("machine_seq,success_prob\n");

        let importer = MachineParamImporter::new();
        match importer.import_from_csv(file.path()) {
            Err(ImportError::EmptyFile) => {}
            other => panic!("期望 EmptyFile, 实际 {:?}", other.err()),
        }
    }
}
