//! Core domain primitives.

pub mod error;
