//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod installer;
pub mod launcher;
pub mod probe;
pub mod progress;
pub mod report_log;
pub mod store;
pub mod workspace;
