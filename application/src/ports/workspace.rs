//! Workspace filesystem port.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("Failed to create log directory {path}: {source}")]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Log directory {path} is not writable: {source}")]
    NotWritable {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Filesystem preparation under the working directory.
pub trait WorkspacePort: Send + Sync {
    /// Ensure `path` exists as a directory writable by the process user.
    fn ensure_log_dir(&self, path: &Path) -> Result<(), WorkspaceError>;
}
