// ==========================================
// 制造网络可靠度分析系统 - 控制台入口
// ==========================================
// 模型依据: Lin & Chang (2012) 制造网络重工可靠度模型
// 系统定位: 决策支持系统 (展示壳由外部驾驶舱承担)
// ==========================================

use mfg_network_reliability::api::DashboardApi;
use mfg_network_reliability::config::ConfigManager;

fn main() {
    // 初始化日志系统
    mfg_network_reliability::logging::init();

    tracing::info!("==================================================");
    tracing::info!("制造网络可靠度分析系统 - 决策支持系统");
    tracing::info!("系统版本: {}", mfg_network_reliability::VERSION);
    tracing::info!("==================================================");

    // 加载默认分析参数
    let config_manager = ConfigManager::load_or_default();
    let request = config_manager.default_request();
    tracing::info!(
        demand = request.demand,
        machine_count = request.machine_count,
        rework_end = request.rework_end,
        rework_offset = request.rework_offset,
        "使用默认分析参数"
    );

    // 执行可靠度分析
    let api = DashboardApi::new();
    let response = match api.analyze(&request) {
        Ok(response) => response,
        Err(e) => {
            tracing::error!("可靠度分析失败: {}", e);
            std::process::exit(1);
        }
    };

    // 输出指标
    println!("==================================================");
    println!("{}", mfg_network_reliability::APP_NAME);
    println!("分析ID: {}", response.analysis_id);
    println!("==================================================");
    println!("需求数量 d        : {:.1} 单位", response.demand);
    println!("机器数量 n        : {} 台", response.machine_count);
    println!(
        "重工子段          : {} -> {}",
        response.rework_entry_label, response.rework_end_label
    );
    println!("需投入材料数量 I  : {:.2} 单位", response.input_quantity);
    println!();
    println!("机器    p       q       f_G       f_R       l");
    for row in &response.machine_rows {
        println!(
            "{:<6}  {:.3}   {:.3}   {:>7.2}   {:>7.2}   {:>7.2}",
            row.machine_label,
            row.success_prob,
            row.failure_prob,
            row.general_flow,
            row.rework_flow,
            row.total_load
        );
    }
    println!();
    println!(
        "串联近似可靠度    : {:.4} ({:.2}%)",
        response.series_reliability,
        response.series_reliability * 100.0
    );
    if let Some(r_d) = response.capacity_reliability {
        println!("容量模型可靠度 R_d: {:.4} ({:.2}%)", r_d, r_d * 100.0);
    }
    println!("可用性等级        : {}", response.guidance.availability_level);
    println!();
    println!("{}", response.guidance.headline);
    for suggestion in &response.guidance.suggestions {
        println!("- {}", suggestion);
    }
}
