use std::path::Path;
use std::time::Duration;

use chromiumoxide::{Browser, BrowserConfig};
use tracing::{debug, error, info};

use crate::browser::chrome::{spawn_handler, ChromeEngine};
use crate::config::Config;
use crate::error::{AppError, AppResult};

/// 启动无头浏览器
pub async fn launch_headless_browser(config: &Config) -> AppResult<ChromeEngine> {
    info!("🚀 启动无头浏览器...");

    let mut builder = BrowserConfig::builder();
    builder = if config.headless {
        builder.new_headless_mode()
    } else {
        builder.with_head()
    };
    if let Some(executable) = &config.chrome_executable {
        debug!("浏览器路径: {}", executable);
        builder = builder.chrome_executable(Path::new(executable));
    }
    if config.no_sandbox {
        builder = builder.no_sandbox();
    }
    if let Some(timeout_ms) = config.request_timeout_ms {
        builder = builder.request_timeout(Duration::from_millis(timeout_ms));
    }

    let browser_config = builder
        .args(vec![
            "--disable-gpu",           // 无头模式下禁用 GPU
            "--disable-dev-shm-usage", // 防止共享内存不足
        ])
        .build()
        .map_err(|e| {
            error!("配置无头浏览器失败: {}", e);
            AppError::launch_failed(std::io::Error::new(std::io::ErrorKind::InvalidInput, e))
        })?;

    let (browser, handler) = Browser::launch(browser_config).await.map_err(|e| {
        error!("启动无头浏览器失败: {}", e);
        AppError::launch_failed(e)
    })?;
    debug!("无头浏览器启动成功");

    Ok(ChromeEngine::new(browser, spawn_handler(handler), true))
}
