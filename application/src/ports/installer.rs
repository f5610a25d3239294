//! Dependency installer port.
//!
//! The actual install is delegated to the external package-manager CLI,
//! which consumes the manifest and lock file itself. The port only carries
//! where to run and which groups to leave out.

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

/// What the installer adapter needs for one install run.
#[derive(Debug, Clone)]
pub struct InstallRequest {
    /// Directory containing the manifest and lock file.
    pub working_dir: PathBuf,
    /// Dependency groups to exclude (normally `dev`).
    pub excluded_groups: Vec<String>,
}

/// Installer failures. All are fatal to provisioning.
#[derive(Debug, Error)]
pub enum InstallerError {
    #[error("Package manager '{0}' not found on PATH")]
    ManagerUnavailable(String),

    #[error("Install failed with exit code {code}: {stderr}")]
    InstallFailed { code: i32, stderr: String },

    #[error("Failed to run package manager: {0}")]
    Io(#[from] std::io::Error),
}

/// Drives the external dependency manager to a deterministic install.
#[async_trait]
pub trait DependencyInstaller: Send + Sync {
    /// Run the install. Returns a human-readable summary on success.
    async fn install(&self, request: &InstallRequest) -> Result<String, InstallerError>;
}
