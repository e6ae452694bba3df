//! 单个页面处理器 - 编排层
//!
//! 负责一个目录条目的完整生命周期：开页面 → print 媒体 → 导航 → 固定等待 → 导出 PDF → 关闭页面

use std::path::Path;
use std::time::Duration;

use tokio::fs;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};
use crate::infrastructure::{BrowserEngine, PageSession, PdfOptions};
use crate::models::TocEntry;

/// 截取单个页面并写入 `target_path`
///
/// 页面无论成功与否都会被关闭；目标文件的父目录必须已经存在
pub async fn capture_page<E: BrowserEngine>(
    engine: &E,
    entry: &TocEntry,
    target_path: &Path,
    settle_delay: Duration,
) -> AppResult<()> {
    let options = PdfOptions::new(entry.paper_size()?);
    debug!("页面尺寸: {}", options.paper);

    let mut page = engine.new_page().await?;
    let rendered = render(&mut page, &entry.url, &options, settle_delay).await;
    if let Err(e) = page.close().await {
        warn!("关闭页面失败 ({}): {}", entry.url, e);
    }
    let pdf = rendered?;

    fs::write(target_path, &pdf)
        .await
        .map_err(|e| AppError::write_failed(target_path, e))?;
    info!("✓ 已保存: {}", target_path.display());

    Ok(())
}

async fn render<P: PageSession>(
    page: &mut P,
    url: &str,
    options: &PdfOptions,
    settle_delay: Duration,
) -> AppResult<Vec<u8>> {
    page.emulate_print_media().await?;
    page.goto(url).await?;

    // 页面由脚本/websocket 渲染，没有可观察的完成事件，只能固定等待
    sleep(settle_delay).await;

    page.print_to_pdf(options).await
}
