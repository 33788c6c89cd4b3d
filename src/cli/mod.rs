//! CLI layer - Command-line interface
//!
//! Contains argument parsing, logging setup, output formatting,
//! and the push runner.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod logging;
pub mod presenter;

// Re-export commonly used types
pub use app::{run_push, PushOptions, EXIT_ERROR, EXIT_SUCCESS};
pub use args::{Cli, Commands, ConfigAction};
pub use logging::init_logging;
pub use presenter::Presenter;
