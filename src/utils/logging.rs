/// 日志工具模块
///
/// 提供日志初始化、启动横幅和最终统计的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::models::InputFormat;
use crate::orchestrator::RunReport;

/// 初始化日志
///
/// 重复调用是安全的（测试里会多次初始化）
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config, format: InputFormat) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 并发文件行处理模式");
    info!("📁 输入文件: {}", config.input_file);
    info!("📄 输入格式: {}", format.name());
    info!("📊 配置的并发数: {}", config.pool_size);
    info!("{}", "=".repeat(60));
}

/// 打印最终统计信息
pub fn print_final_stats(report: &RunReport, warn_file: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", report.success, report.classified);
    info!("❌ 失败: {}", report.failed);
    info!("{}", "=".repeat(60));
    if report.failed > 0 {
        info!("\n失败的行已写入: {}", warn_file);
    }
}
