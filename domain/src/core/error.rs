//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid version '{0}'")]
    InvalidVersion(String),

    #[error("Invalid requirement '{0}'")]
    InvalidRequirement(String),
}
