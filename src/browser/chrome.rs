use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::emulation::SetEmulatedMediaParams;
use chromiumoxide::cdp::browser_protocol::page::PrintToPdfParams;
use chromiumoxide::{Browser, Handler, Page};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::browser::{connect_to_browser, launch_headless_browser};
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::infrastructure::{BrowserEngine, PageSession, PdfOptions};

/// 基于 chromiumoxide 的浏览器引擎
pub struct ChromeEngine {
    browser: Browser,
    handler: Option<JoinHandle<()>>,
    /// 自己启动的进程在结束时关闭；连接到的外部浏览器只断开连接
    owns_process: bool,
}

impl ChromeEngine {
    /// 按配置启动浏览器，设置了调试端口时改为连接已运行的浏览器
    pub async fn start(config: &Config) -> AppResult<Self> {
        match config.browser_debug_port {
            Some(port) => connect_to_browser(port).await,
            None => launch_headless_browser(config).await,
        }
    }

    pub(crate) fn new(browser: Browser, handler: JoinHandle<()>, owns_process: bool) -> Self {
        Self {
            browser,
            handler: Some(handler),
            owns_process,
        }
    }
}

/// 在后台处理浏览器事件
pub(crate) fn spawn_handler(mut handler: Handler) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    })
}

#[async_trait]
impl BrowserEngine for ChromeEngine {
    type Page = ChromePage;

    async fn new_page(&self) -> AppResult<ChromePage> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(AppError::page_creation_failed)?;
        Ok(ChromePage::new(page))
    }

    async fn close(&mut self) -> AppResult<()> {
        if self.owns_process {
            debug!("正在关闭浏览器...");
            self.browser
                .close()
                .await
                .map_err(AppError::shutdown_failed)?;
            if let Err(e) = self.browser.wait().await {
                warn!("等待浏览器进程退出失败: {}", e);
            }
        } else {
            debug!("断开与浏览器的连接");
        }

        if let Some(handler) = self.handler.take() {
            handler.abort();
            let _ = handler.await;
        }
        debug!("浏览器资源已释放");
        Ok(())
    }
}

/// chromiumoxide 页面
pub struct ChromePage {
    page: Page,
    url: Option<String>,
}

impl ChromePage {
    fn new(page: Page) -> Self {
        Self { page, url: None }
    }

    fn current_url(&self) -> &str {
        self.url.as_deref().unwrap_or("about:blank")
    }
}

#[async_trait]
impl PageSession for ChromePage {
    async fn emulate_print_media(&self) -> AppResult<()> {
        let params = SetEmulatedMediaParams::builder().media("print").build();
        self.page
            .execute(params)
            .await
            .map_err(AppError::media_emulation_failed)?;
        Ok(())
    }

    async fn goto(&mut self, url: &str) -> AppResult<()> {
        self.page
            .goto(url)
            .await
            .map_err(|e| AppError::navigation_failed(url, e))?;
        self.url = Some(url.to_string());
        debug!("页面导航成功: {}", url);
        Ok(())
    }

    async fn print_to_pdf(&self, options: &PdfOptions) -> AppResult<Vec<u8>> {
        let params = PrintToPdfParams::builder()
            .print_background(options.print_background)
            .paper_width(options.paper.width_inches())
            .paper_height(options.paper.height_inches())
            .margin_top(0.0)
            .margin_bottom(0.0)
            .margin_left(0.0)
            .margin_right(0.0)
            .build();

        let pdf = self
            .page
            .pdf(params)
            .await
            .map_err(|e| AppError::render_failed(self.current_url(), e))?;
        debug!("PDF 导出完成: {} 字节", pdf.len());
        Ok(pdf)
    }

    async fn close(&self) -> AppResult<()> {
        self.page.clone().close().await?;
        Ok(())
    }
}
