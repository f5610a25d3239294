//! TOML-backed manifest and lock-file store.

use roost_application::ports::store::{ManifestStore, StoreError};
use roost_domain::{Lockfile, ProjectManifest};
use std::path::Path;
use tracing::debug;

/// Reads the project manifest and lock file from disk.
pub struct TomlManifestStore;

impl TomlManifestStore {
    fn read(path: &Path) -> Result<String, StoreError> {
        std::fs::read_to_string(path).map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl ManifestStore for TomlManifestStore {
    fn load_manifest(&self, path: &Path) -> Result<ProjectManifest, StoreError> {
        let raw = Self::read(path)?;
        let manifest = toml::from_str(&raw).map_err(|e| StoreError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        debug!(path = %path.display(), "manifest loaded");
        Ok(manifest)
    }

    fn load_lockfile(&self, path: &Path) -> Result<Lockfile, StoreError> {
        let raw = Self::read(path)?;
        let lockfile = toml::from_str(&raw).map_err(|e| StoreError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        debug!(path = %path.display(), "lock file loaded");
        Ok(lockfile)
    }
}
