pub mod loaders;
pub mod toc;

pub use loaders::{load_toc, load_toc_with_delimiter};
pub use toc::{Length, PaperSize, TocEntry, TocTable, TOC_COLUMNS};
