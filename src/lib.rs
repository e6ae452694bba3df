//! # Page Capture
//!
//! 按目录文件逐个打开网页，并将其导出为指定尺寸的 PDF 快照
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - `BrowserEngine` / `PageSession`，只暴露截取需要的能力
//! - `browser/` - 基于 chromiumoxide 的实现（启动或连接浏览器）
//!
//! ### ② 数据层（Models）
//! - `models/toc` - `TocEntry` / `TocTable` / 页面尺寸
//! - `models/loaders` - 目录文件加载与排序
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 持有浏览器，顺序处理整个目录
//! - `orchestrator/page_processor` - 处理单个页面
//!
//! ## 模块结构

pub mod browser;
pub mod cli;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod utils;

// 重新导出常用类型
pub use browser::ChromeEngine;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{BrowserEngine, PageSession, PdfOptions};
pub use models::{load_toc, TocEntry, TocTable};
pub use orchestrator::{capture_pages, App, CaptureReport};
