//! Durable logging adapters.

pub mod jsonl_report;

pub use jsonl_report::JsonlReportLogger;
