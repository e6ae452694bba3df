//! 批量截取处理器 - 编排层
//!
//! ## 职责
//!
//! 1. **加载目录**：读取并排序目录文件（`TocTable`）
//! 2. **资源管理**：整个运行期间只持有一个浏览器，结束或出错时都会关闭
//! 3. **顺序处理**：逐条委托 `page_processor` 截取，遇到错误立即停止
//! 4. **统计输出**：汇总写出的文件和耗时

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{error, info, warn};

use crate::browser::ChromeEngine;
use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::BrowserEngine;
use crate::models::{load_toc_with_delimiter, TocTable};
use crate::orchestrator::page_processor;
use crate::utils::logging::{log_startup, log_toc_loaded, print_final_stats};

/// 应用主结构
pub struct App {
    config: Config,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// 加载目录文件并截取其中所有页面
    ///
    /// 目录为空（只有表头）时直接返回 `Ok` 和空的 [`CaptureReport`]，
    /// 不会启动或连接浏览器，因此本机没有 Chrome 也不会报错
    pub async fn run(&self, toc_path: &Path, dest_folder: &Path) -> AppResult<CaptureReport> {
        log_startup(&self.config, toc_path, dest_folder);

        // 目录加载失败时不会启动浏览器
        let table = load_toc_with_delimiter(toc_path, self.config.toc_delimiter).await?;
        if table.is_empty() {
            warn!("⚠️ 目录文件中没有页面，程序结束");
            return Ok(CaptureReport::default());
        }
        log_toc_loaded(&table, &self.config);

        let engine = ChromeEngine::start(&self.config).await?;
        let report = capture_pages(engine, &table, dest_folder, self.config.settle_delay()).await?;

        print_final_stats(&report);
        Ok(report)
    }
}

/// 截取结果统计
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CaptureReport {
    /// 按处理顺序写出的文件
    pub files: Vec<PathBuf>,
    /// 总耗时（包含浏览器关闭）
    pub elapsed: Duration,
}

impl CaptureReport {
    pub fn captured(&self) -> usize {
        self.files.len()
    }
}

/// 按目录顺序逐条截取
///
/// 浏览器由本函数接管：最后一条处理完或任意一条失败后都会关闭，且只关闭一次。
/// 截取失败与关闭失败同时发生时返回截取错误。
pub async fn capture_pages<E: BrowserEngine>(
    mut engine: E,
    table: &TocTable,
    dest_folder: &Path,
    settle_delay: Duration,
) -> AppResult<CaptureReport> {
    let started = Instant::now();

    let result = capture_all(&engine, table, dest_folder, settle_delay).await;
    let closed = engine.close().await;

    match (result, closed) {
        (Ok(mut report), Ok(())) => {
            report.elapsed = started.elapsed();
            Ok(report)
        }
        (Ok(_), Err(e)) => Err(e),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(close_err)) => {
            warn!("关闭浏览器失败: {}", close_err);
            Err(e)
        }
    }
}

async fn capture_all<E: BrowserEngine>(
    engine: &E,
    table: &TocTable,
    dest_folder: &Path,
    settle_delay: Duration,
) -> AppResult<CaptureReport> {
    let total = table.len();
    let mut report = CaptureReport::default();

    for (index, entry) in table.iter().enumerate() {
        let target_path = entry.target_path(dest_folder);
        info!(
            "🌐 [{}/{}] 正在加载 {}，等待 {} 秒...",
            index + 1,
            total,
            entry.url,
            settle_delay.as_secs_f64()
        );

        if let Err(e) =
            page_processor::capture_page(engine, entry, &target_path, settle_delay).await
        {
            error!("[{}/{}] ❌ 截取失败 {}: {}", index + 1, total, entry.url, e);
            return Err(e);
        }
        report.files.push(target_path);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, BrowserError, CaptureError, FileError};
    use crate::infrastructure::{PageSession, PdfOptions};
    use crate::models::TocEntry;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    const FAKE_PDF: &[u8] = b"%PDF-1.4\n%fake\n";

    type EventLog = Arc<Mutex<Vec<String>>>;

    /// 内存中的浏览器，记录每一步调用
    struct FakeEngine {
        events: EventLog,
        failing_urls: Vec<String>,
    }

    impl FakeEngine {
        fn new(failing_urls: &[&str]) -> (Self, EventLog) {
            let events = EventLog::default();
            let engine = Self {
                events: events.clone(),
                failing_urls: failing_urls.iter().map(|u| u.to_string()).collect(),
            };
            (engine, events)
        }
    }

    struct FakePage {
        events: EventLog,
        failing_urls: Vec<String>,
        url: Option<String>,
    }

    impl FakePage {
        fn record(&self, event: String) {
            self.events.lock().unwrap().push(event);
        }
    }

    #[async_trait]
    impl BrowserEngine for FakeEngine {
        type Page = FakePage;

        async fn new_page(&self) -> AppResult<FakePage> {
            self.events.lock().unwrap().push("new_page".to_string());
            Ok(FakePage {
                events: self.events.clone(),
                failing_urls: self.failing_urls.clone(),
                url: None,
            })
        }

        async fn close(&mut self) -> AppResult<()> {
            self.events.lock().unwrap().push("close_browser".to_string());
            Ok(())
        }
    }

    #[async_trait]
    impl PageSession for FakePage {
        async fn emulate_print_media(&self) -> AppResult<()> {
            self.record("media:print".to_string());
            Ok(())
        }

        async fn goto(&mut self, url: &str) -> AppResult<()> {
            if self.failing_urls.iter().any(|u| u == url) {
                self.record(format!("goto_failed:{url}"));
                return Err(AppError::navigation_failed(
                    url,
                    std::io::Error::new(std::io::ErrorKind::Other, "net::ERR_NAME_NOT_RESOLVED"),
                ));
            }
            self.record(format!("goto:{url}"));
            self.url = Some(url.to_string());
            Ok(())
        }

        async fn print_to_pdf(&self, options: &PdfOptions) -> AppResult<Vec<u8>> {
            self.record(format!(
                "pdf:{}:{}:bg={}",
                self.url.as_deref().unwrap_or_default(),
                options.paper,
                options.print_background
            ));
            Ok(FAKE_PDF.to_vec())
        }

        async fn close(&self) -> AppResult<()> {
            self.record("close_page".to_string());
            Ok(())
        }
    }

    fn entry(folder: &str, file_name: &str, url: &str) -> TocEntry {
        TocEntry {
            folder: folder.to_string(),
            file_name: file_name.to_string(),
            url: url.to_string(),
            orientation: "Portrait".to_string(),
            width: "8.5".to_string(),
            height: "11".to_string(),
        }
    }

    fn dest_with_folders(folders: &[&str]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for folder in folders {
            std::fs::create_dir_all(dir.path().join(folder)).unwrap();
        }
        dir
    }

    fn count(events: &EventLog, name: &str) -> usize {
        events.lock().unwrap().iter().filter(|e| *e == name).count()
    }

    #[tokio::test]
    async fn test_pages_are_captured_in_table_order() {
        let dest = dest_with_folders(&["docs", "reports"]);
        let table = TocTable::new(vec![
            entry("reports", "a.pdf", "https://example.com/a"),
            entry("docs", "page1.pdf", "https://example.com/page1"),
        ]);
        let (engine, events) = FakeEngine::new(&[]);

        let report = capture_pages(engine, &table, dest.path(), Duration::ZERO)
            .await
            .unwrap();

        assert_eq!(
            report.files,
            vec![
                dest.path().join("docs").join("page1.pdf"),
                dest.path().join("reports").join("a.pdf"),
            ]
        );
        assert_eq!(report.captured(), 2);
        for file in &report.files {
            assert_eq!(std::fs::read(file).unwrap(), FAKE_PDF);
        }

        let events = events.lock().unwrap().clone();
        assert_eq!(
            events,
            vec![
                "new_page",
                "media:print",
                "goto:https://example.com/page1",
                "pdf:https://example.com/page1:8.5in x 11in:bg=true",
                "close_page",
                "new_page",
                "media:print",
                "goto:https://example.com/a",
                "pdf:https://example.com/a:8.5in x 11in:bg=true",
                "close_page",
                "close_browser",
            ]
        );
    }

    #[tokio::test]
    async fn test_navigation_failure_stops_the_run() {
        let dest = dest_with_folders(&["docs"]);
        let table = TocTable::new(vec![
            entry("docs", "1.pdf", "https://example.com/1"),
            entry("docs", "2.pdf", "https://bad.invalid/2"),
            entry("docs", "3.pdf", "https://example.com/3"),
        ]);
        let (engine, events) = FakeEngine::new(&["https://bad.invalid/2"]);

        let err = capture_pages(engine, &table, dest.path(), Duration::ZERO)
            .await
            .unwrap_err();

        match err {
            AppError::Browser(BrowserError::NavigationFailed { url, .. }) => {
                assert_eq!(url, "https://bad.invalid/2")
            }
            other => panic!("期望 NavigationFailed, 实际: {other}"),
        }
        assert!(dest.path().join("docs/1.pdf").exists());
        assert!(!dest.path().join("docs/2.pdf").exists());
        assert!(!dest.path().join("docs/3.pdf").exists());

        assert_eq!(count(&events, "close_browser"), 1);
        assert_eq!(count(&events, "close_page"), 2, "失败的页面也要关闭");
        let events = events.lock().unwrap();
        assert!(!events.iter().any(|e| e.contains("example.com/3")));
        assert_eq!(events.last().map(String::as_str), Some("close_browser"));
    }

    #[tokio::test]
    async fn test_missing_parent_directory_is_not_created() {
        let dest = dest_with_folders(&[]);
        let table = TocTable::new(vec![entry("missing", "a.pdf", "https://example.com/a")]);
        let (engine, events) = FakeEngine::new(&[]);

        let err = capture_pages(engine, &table, dest.path(), Duration::ZERO)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::File(FileError::WriteFailed { .. })));
        assert!(!dest.path().join("missing").exists());
        assert_eq!(count(&events, "close_browser"), 1);
    }

    #[tokio::test]
    async fn test_invalid_dimension_fails_before_opening_page() {
        let dest = dest_with_folders(&["docs"]);
        let mut bad = entry("docs", "a.pdf", "https://example.com/a");
        bad.height = "tall".to_string();
        let table = TocTable::new(vec![bad]);
        let (engine, events) = FakeEngine::new(&[]);

        let err = capture_pages(engine, &table, dest.path(), Duration::ZERO)
            .await
            .unwrap_err();

        match err {
            AppError::Capture(CaptureError::InvalidDimension { value }) => assert_eq!(value, "tallin"),
            other => panic!("期望 InvalidDimension, 实际: {other}"),
        }
        assert_eq!(count(&events, "new_page"), 0);
        assert_eq!(count(&events, "close_browser"), 1);
    }

    #[tokio::test]
    async fn test_empty_table_still_closes_browser() {
        let dest = dest_with_folders(&[]);
        let (engine, events) = FakeEngine::new(&[]);

        let report = capture_pages(engine, &TocTable::default(), dest.path(), Duration::ZERO)
            .await
            .unwrap();

        assert_eq!(report.captured(), 0);
        assert_eq!(*events.lock().unwrap(), vec!["close_browser".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_page_waits_settle_delay() {
        let dest = dest_with_folders(&["docs"]);
        let table = TocTable::new(vec![
            entry("docs", "1.pdf", "https://example.com/1"),
            entry("docs", "2.pdf", "https://example.com/2"),
        ]);
        let (engine, _events) = FakeEngine::new(&[]);
        let settle = Config::default().settle_delay();

        let started = tokio::time::Instant::now();
        capture_pages(engine, &table, dest.path(), settle)
            .await
            .unwrap();

        assert!(started.elapsed() >= Duration::from_secs(10));
    }
}
