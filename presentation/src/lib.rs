//! Presentation layer for roost
//!
//! This crate contains the CLI definition, configuration overrides,
//! output formatting, and progress reporting.

pub mod cli;
pub mod config;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use config::overrides::{apply_cli_overrides, build_plan};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
