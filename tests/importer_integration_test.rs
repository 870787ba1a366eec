// ==========================================
// 机器参数导入集成测试
// ==========================================
// 测试目标: 验证 CSV 导入 -> 分析请求 -> 可靠度分析 的完整链路
// ==========================================

use std::io::Write;

use mfg_network_reliability::api::dto::AnalysisRequest;
use mfg_network_reliability::api::DashboardApi;
use mfg_network_reliability::domain::types::ModelVariant;
use mfg_network_reliability::importer::error::ImportError;
use mfg_network_reliability::importer::MachineParamImporter;
use mfg_network_reliability::logging;

// ==========================================
// 测试辅助函数
// ==========================================

/// 写入测试用 CSV 文件
fn write_csv(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("创建临时文件失败");
    file.write_all(content.as_bytes()).expect("写入临时文件失败");
    file.flush().expect("刷新临时文件失败");
    file
}

// ==========================================
// 测试用例 1: 导入后直接驱动分析
// ==========================================

#[test]
fn test_import_then_analyze() {
    logging::init_test();
    let file = write_csv(
        "machine_seq,success_prob,capacity_levels,capacity_probs\n\
         1,0.95,100;200;300,0.1;0.3;0.6\n\
         2,0.93,100;200;300,0.1;0.3;0.6\n\
         3,0.9,100;200;300,0.05;0.25;0.7\n\
         4,0.92,100;200;300,0.1;0.2;0.7\n\
         5,0.96,100;200;300,0.1;0.3;0.6\n",
    );

    let importer = MachineParamImporter::new();
    let imported = importer.import_from_csv(file.path()).unwrap();
    assert_eq!(imported.success_probs.len(), 5);

    let request = AnalysisRequest {
        variant: ModelVariant::Heterogeneous,
        demand: 150.0,
        machine_count: imported.success_probs.len(),
        rework_end: 4,
        rework_offset: 1,
        uniform_success_prob: None,
        success_probs: Some(imported.success_probs.clone()),
        capacity_lattice: imported.capacity_lattice.clone(),
        capacity_table: imported.capacity_table.clone(),
    };

    let api = DashboardApi::new();
    let response = api.analyze(&request).unwrap();

    let expected_series: f64 = imported.success_probs.iter().product();
    assert!((response.series_reliability - expected_series).abs() < 1e-9);
    assert!(response.capacity_reliability.is_some());
    for row in &response.machine_rows {
        assert!(row.min_capacity.is_some());
        assert!(row.meet_probability.is_some());
    }
}

// ==========================================
// 测试用例 2: 仅成功率列的导入
// ==========================================

#[test]
fn test_import_probabilities_only_flow() {
    let file = write_csv(
        "machine_seq,success_prob\n\
         1,0.95\n\
         2,0.9\n\
         3,0.85\n\
         4,0.9\n",
    );

    let importer = MachineParamImporter::new();
    let imported = importer.import_from_csv(file.path()).unwrap();

    assert_eq!(imported.success_probs, vec![0.95, 0.9, 0.85, 0.9]);
    assert!(imported.capacity_lattice.is_none());
    assert!(imported.capacity_table.is_none());
}

// ==========================================
// 测试用例 3: 数据质量错误指明行号
// ==========================================

#[test]
fn test_import_errors_carry_row_numbers() {
    let importer = MachineParamImporter::new();

    // 行3成功率越界
    let file = write_csv(
        "machine_seq,success_prob\n\
         1,0.95\n\
         2,-0.1\n",
    );
    match importer.import_from_csv(file.path()) {
        Err(ImportError::ValueRangeError { row, field, .. }) => {
            assert_eq!(row, 3);
            assert_eq!(field, "success_prob");
        }
        other => panic!("期望 ValueRangeError, 实际 {:?}", other.err()),
    }

    // 行2类型转换失败
    let file = write_csv(
        "machine_seq,success_prob\n\
         1,abc\n",
    );
    match importer.import_from_csv(file.path()) {
        Err(ImportError::TypeConversionError { row, field, .. }) => {
            assert_eq!(row, 2);
            assert_eq!(field, "success_prob");
        }
        other => panic!("期望 TypeConversionError, 实际 {:?}", other.err()),
    }
}
