pub mod csv_loader;

pub use csv_loader::{load_toc, load_toc_with_delimiter};
