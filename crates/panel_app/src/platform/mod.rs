//! Console host for the crawl panel: wires the pure core to the HTTP client.
mod app;
mod console;
mod effects;
mod logging;
mod settings;
mod ui;

pub use app::run_app;
