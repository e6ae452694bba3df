//! 浏览器引擎抽象 - 基础设施层
//!
//! 只描述截取流程需要的能力：开页面、切换 print 媒体、导航、导出 PDF、关闭。
//! 生产环境由 chromiumoxide 实现，测试中可以替换为内存实现。

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::PaperSize;

/// 导出 PDF 的参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PdfOptions {
    pub paper: PaperSize,
    pub print_background: bool,
}

impl PdfOptions {
    pub fn new(paper: PaperSize) -> Self {
        Self {
            paper,
            print_background: true,
        }
    }
}

/// 浏览器进程
///
/// 整个运行期间只持有一个，`close` 只会被调用一次
#[async_trait]
pub trait BrowserEngine: Send + Sync {
    type Page: PageSession;

    /// 打开一个新页面
    async fn new_page(&self) -> AppResult<Self::Page>;

    /// 关闭浏览器并释放资源
    async fn close(&mut self) -> AppResult<()>;
}

/// 单个页面
#[async_trait]
pub trait PageSession: Send + Sync {
    /// 模拟 print 媒体，让打印样式表生效
    async fn emulate_print_media(&self) -> AppResult<()>;

    /// 导航到 URL 并等待页面加载完成
    async fn goto(&mut self, url: &str) -> AppResult<()>;

    /// 将当前页面导出为 PDF
    async fn print_to_pdf(&self, options: &PdfOptions) -> AppResult<Vec<u8>>;

    /// 关闭页面
    async fn close(&self) -> AppResult<()>;
}
