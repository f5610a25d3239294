//! Verify Lock use case.
//!
//! Loads the manifest and lock file and checks their consistency without
//! touching the host environment. Used directly by `--verify-lock` and as
//! the gate in front of the dependency install step.

use crate::config::AppConfig;
use crate::ports::store::{ManifestStore, StoreError};
use roost_domain::{LockError, verify};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum VerifyLockError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Lock(#[from] LockError),
}

/// What a successful verification found.
#[derive(Debug, Clone, Copy)]
pub struct VerifyLockOutput {
    /// Total locked packages.
    pub packages: usize,
    /// Packages that survive the configured group exclusions.
    pub runtime_packages: usize,
}

pub struct VerifyLockUseCase<S: ManifestStore> {
    store: Arc<S>,
}

impl<S: ManifestStore> VerifyLockUseCase<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn execute(&self, config: &AppConfig) -> Result<VerifyLockOutput, VerifyLockError> {
        let manifest = self.store.load_manifest(&config.manifest_file())?;
        let lockfile = self.store.load_lockfile(&config.lock_file())?;

        verify(&manifest, &lockfile)?;

        let runtime = lockfile
            .runtime_packages(&config.installer.excluded_groups)
            .len();
        debug!(
            packages = lockfile.packages.len(),
            runtime, "lock file verified"
        );

        Ok(VerifyLockOutput {
            packages: lockfile.packages.len(),
            runtime_packages: runtime,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roost_domain::{Lockfile, ProjectManifest, manifest_content_hash};
    use std::path::Path;

    struct FixtureStore {
        manifest: ProjectManifest,
        lockfile: Lockfile,
    }

    impl ManifestStore for FixtureStore {
        fn load_manifest(&self, _path: &Path) -> Result<ProjectManifest, StoreError> {
            Ok(self.manifest.clone())
        }

        fn load_lockfile(&self, _path: &Path) -> Result<Lockfile, StoreError> {
            Ok(self.lockfile.clone())
        }
    }

    fn fixture(stale: bool) -> FixtureStore {
        let manifest: ProjectManifest = toml::from_str(
            r#"
            [dependencies]
            motor = "^3.3"

            [groups.dev.dependencies]
            black = "*"
            "#,
        )
        .unwrap();

        let mut lockfile: Lockfile = toml::from_str(
            r#"
            [[package]]
            name = "motor"
            version = "3.3.2"
            groups = ["main"]

            [[package]]
            name = "black"
            version = "24.1.0"
            groups = ["dev"]
            "#,
        )
        .unwrap();
        lockfile.metadata.manifest_hash = if stale {
            "sha256:stale".to_string()
        } else {
            manifest_content_hash(&manifest)
        };

        FixtureStore { manifest, lockfile }
    }

    #[test]
    fn test_verify_counts_runtime_packages() {
        let use_case = VerifyLockUseCase::new(Arc::new(fixture(false)));
        let output = use_case.execute(&AppConfig::default()).unwrap();
        assert_eq!(output.packages, 2);
        assert_eq!(output.runtime_packages, 1);
    }

    #[test]
    fn test_stale_lock_fails() {
        let use_case = VerifyLockUseCase::new(Arc::new(fixture(true)));
        let result = use_case.execute(&AppConfig::default());
        assert!(matches!(
            result,
            Err(VerifyLockError::Lock(LockError::StaleLock { .. }))
        ));
    }
}
