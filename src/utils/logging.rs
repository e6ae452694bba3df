//! 日志工具模块
//!
//! 提供日志初始化以及启动、统计信息的输出

use std::path::Path;

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::models::TocTable;
use crate::orchestrator::CaptureReport;

/// 初始化日志
///
/// `RUST_LOG` 优先；否则本程序为 info（详细模式为 debug），chromiumoxide 只输出警告
pub fn init(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("page_capture={level},chromiumoxide=warn")));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config, toc_path: &Path, dest_folder: &Path) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 页面 PDF 快照");
    info!("📄 目录文件: {}", toc_path.display());
    info!("📁 输出目录: {}", dest_folder.display());
    info!("{}", "=".repeat(60));
    debug!("配置: {:?}", config);
}

/// 记录目录加载信息
pub fn log_toc_loaded(table: &TocTable, config: &Config) {
    info!("✓ 找到 {} 个待截取的页面", table.len());
    info!("⏱️ 每个页面加载后等待 {} 毫秒", config.settle_delay_ms);
    match config.browser_debug_port {
        Some(port) => info!("🔌 将连接到调试端口 {} 上的浏览器\n", port),
        None => info!("💡 将启动新的浏览器进程\n"),
    }
}

/// 打印最终统计信息
pub fn print_final_stats(report: &CaptureReport) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}", report.captured());
    info!("⏱️ 耗时: {:.1} 秒", report.elapsed.as_secs_f64());
    info!("{}", "=".repeat(60));
}
