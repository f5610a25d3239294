//! Manifest and lock-file store port.

use roost_domain::{Lockfile, ProjectManifest};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Loads manifest and lock files from disk.
pub trait ManifestStore: Send + Sync {
    fn load_manifest(&self, path: &Path) -> Result<ProjectManifest, StoreError>;
    fn load_lockfile(&self, path: &Path) -> Result<Lockfile, StoreError>;
}
