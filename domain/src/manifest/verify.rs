//! Lock consistency verification.
//!
//! Run before any install. Every failure here is fatal: a stale or
//! incomplete lock must abort provisioning before the entry process is
//! ever considered.

use crate::manifest::lockfile::{Lockfile, manifest_content_hash};
use crate::manifest::project::ProjectManifest;
use crate::manifest::version::{Requirement, Version};
use std::collections::BTreeSet;
use thiserror::Error;

/// Ways a lock file can disagree with its manifest.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LockError {
    #[error("Lock file is stale: manifest hash {manifest} does not match locked hash {locked}")]
    StaleLock { manifest: String, locked: String },

    #[error("Dependency '{0}' is declared in the manifest but missing from the lock file")]
    MissingPackage(String),

    #[error("Locked version {locked} of '{name}' does not satisfy requirement {required}")]
    UnmetRequirement {
        name: String,
        required: Requirement,
        locked: Version,
    },

    #[error("Lock file is not closed: '{package}' depends on '{missing}', which is not locked")]
    OpenClosure { package: String, missing: String },

    #[error("Package '{0}' appears more than once in the lock file")]
    DuplicatePackage(String),
}

/// Check that `lockfile` is a consistent resolution of `manifest`.
///
/// Verifies, in order: no duplicate entries, the recorded manifest hash,
/// every declared dependency (runtime and grouped) pinned with a satisfying
/// version, and closure over the locked packages' own dependencies.
pub fn verify(manifest: &ProjectManifest, lockfile: &Lockfile) -> Result<(), LockError> {
    let mut seen = BTreeSet::new();
    for pkg in &lockfile.packages {
        if !seen.insert(pkg.name.as_str()) {
            return Err(LockError::DuplicatePackage(pkg.name.clone()));
        }
    }

    let current = manifest_content_hash(manifest);
    if lockfile.metadata.manifest_hash != current {
        return Err(LockError::StaleLock {
            manifest: current,
            locked: lockfile.metadata.manifest_hash.clone(),
        });
    }

    for (_, name, req) in manifest.all_dependencies() {
        let pkg = lockfile
            .find(name)
            .ok_or_else(|| LockError::MissingPackage(name.to_string()))?;
        if !req.matches(&pkg.version) {
            return Err(LockError::UnmetRequirement {
                name: name.to_string(),
                required: req.clone(),
                locked: pkg.version.clone(),
            });
        }
    }

    for pkg in &lockfile.packages {
        for dep in &pkg.dependencies {
            if !seen.contains(dep.as_str()) {
                return Err(LockError::OpenClosure {
                    package: pkg.name.clone(),
                    missing: dep.clone(),
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest() -> ProjectManifest {
        toml::from_str(
            r#"
            [dependencies]
            "discord-py" = "^2.3"

            [groups.dev.dependencies]
            black = "*"
            "#,
        )
        .unwrap()
    }

    fn locked(manifest: &ProjectManifest, packages: &str) -> Lockfile {
        let mut lock: Lockfile = toml::from_str(packages).unwrap();
        lock.metadata.manifest_hash = manifest_content_hash(manifest);
        lock
    }

    #[test]
    fn test_consistent_lock_verifies() {
        let m = manifest();
        let lock = locked(
            &m,
            r#"
            [[package]]
            name = "discord-py"
            version = "2.3.2"
            dependencies = ["aiohttp"]
            groups = ["main"]

            [[package]]
            name = "aiohttp"
            version = "3.9.1"
            groups = ["main"]

            [[package]]
            name = "black"
            version = "24.1.0"
            groups = ["dev"]
            "#,
        );
        assert!(verify(&m, &lock).is_ok());
    }

    #[test]
    fn test_stale_hash_is_fatal() {
        let m = manifest();
        let mut lock = locked(&m, "");
        lock.metadata.manifest_hash = "sha256:outdated".into();
        assert!(matches!(
            verify(&m, &lock),
            Err(LockError::StaleLock { .. })
        ));
    }

    #[test]
    fn test_missing_declared_dependency() {
        let m = manifest();
        let lock = locked(
            &m,
            r#"
            [[package]]
            name = "black"
            version = "24.1.0"
            groups = ["dev"]
            "#,
        );
        assert_eq!(
            verify(&m, &lock),
            Err(LockError::MissingPackage("discord-py".into()))
        );
    }

    #[test]
    fn test_unmet_requirement() {
        let m = manifest();
        let lock = locked(
            &m,
            r#"
            [[package]]
            name = "discord-py"
            version = "3.0.0"

            [[package]]
            name = "black"
            version = "24.1.0"
            "#,
        );
        assert!(matches!(
            verify(&m, &lock),
            Err(LockError::UnmetRequirement { .. })
        ));
    }

    #[test]
    fn test_open_closure_detected() {
        let m = manifest();
        let lock = locked(
            &m,
            r#"
            [[package]]
            name = "discord-py"
            version = "2.3.2"
            dependencies = ["aiohttp"]

            [[package]]
            name = "black"
            version = "24.1.0"
            "#,
        );
        assert_eq!(
            verify(&m, &lock),
            Err(LockError::OpenClosure {
                package: "discord-py".into(),
                missing: "aiohttp".into(),
            })
        );
    }

    #[test]
    fn test_duplicate_package_rejected() {
        let m = manifest();
        let lock = locked(
            &m,
            r#"
            [[package]]
            name = "discord-py"
            version = "2.3.2"

            [[package]]
            name = "discord-py"
            version = "2.3.1"
            "#,
        );
        assert_eq!(
            verify(&m, &lock),
            Err(LockError::DuplicatePackage("discord-py".into()))
        );
    }
}
