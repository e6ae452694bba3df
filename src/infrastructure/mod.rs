pub mod engine;

pub use engine::{BrowserEngine, PageSession, PdfOptions};
