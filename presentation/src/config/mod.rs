//! CLI-over-file configuration resolution.

pub mod overrides;
