//! 编排层（Orchestration Layer）
//!
//! ```text
//! batch_processor (处理 TocTable，持有浏览器)
//!     ↓
//! page_processor (处理单个 TocEntry)
//!     ↓
//! infrastructure (BrowserEngine / PageSession)
//! ```

pub mod batch_processor;
pub mod page_processor;

pub use batch_processor::{capture_pages, App, CaptureReport};
pub use page_processor::capture_page;
