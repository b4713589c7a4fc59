mod app;
mod effects;
mod logging;
mod script;
pub mod ui;

pub use app::{run_app, RunOptions};
pub use logging::LogDestination;
