//! Process launcher port.

use async_trait::async_trait;
use roost_domain::LaunchSpec;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("Failed waiting for the entry process: {0}")]
    Wait(#[from] std::io::Error),
}

/// Runs the entry process in the foreground.
#[async_trait]
pub trait ProcessLauncher: Send + Sync {
    /// Spawn the child, wait for it, and return the exit code to
    /// propagate (`128 + signo` for death by signal).
    async fn run(&self, spec: &LaunchSpec) -> Result<i32, LaunchError>;
}
