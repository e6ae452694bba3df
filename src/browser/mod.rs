pub mod chrome;
pub mod connection;
pub mod headless;

pub use chrome::{ChromeEngine, ChromePage};
pub use connection::connect_to_browser;
pub use headless::launch_headless_browser;
