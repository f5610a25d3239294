//! Lock-file data types and the manifest content hash.

use crate::manifest::project::ProjectManifest;
use crate::manifest::version::Version;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// The fully resolved dependency set, pinned for reproducible installs.
///
/// ```toml
/// [metadata]
/// manifest-hash = "sha256:..."
/// generated-by = "roost"
///
/// [[package]]
/// name = "discord-py"
/// version = "2.3.2"
/// checksum = "sha256:..."
/// dependencies = ["aiohttp"]
/// groups = ["main"]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Lockfile {
    pub metadata: LockMetadata,
    #[serde(rename = "package")]
    pub packages: Vec<LockedPackage>,
}

/// Lock metadata tying the lock to the manifest it was resolved from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LockMetadata {
    /// Content hash of the manifest's dependency tables at resolution time.
    pub manifest_hash: String,
    /// Tool that produced the lock, informational only.
    pub generated_by: Option<String>,
}

/// One pinned package in the resolved closure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LockedPackage {
    pub name: String,
    pub version: Version,
    /// Artifact checksum, when the resolver recorded one.
    pub checksum: Option<String>,
    /// Names of packages this one depends on (all must be locked too).
    pub dependencies: Vec<String>,
    /// Groups that pulled this package in. Empty means `main`.
    pub groups: Vec<String>,
}

impl Default for LockedPackage {
    fn default() -> Self {
        Self {
            name: String::new(),
            version: Version::new(0, 0, 0),
            checksum: None,
            dependencies: Vec::new(),
            groups: Vec::new(),
        }
    }
}

impl LockedPackage {
    /// Whether this package is needed outside the `excluded` groups.
    ///
    /// A package with no recorded groups belongs to `main`.
    pub fn needed_without(&self, excluded: &[String]) -> bool {
        if self.groups.is_empty() {
            return true;
        }
        self.groups.iter().any(|g| !excluded.contains(g))
    }
}

impl Lockfile {
    /// Find a locked package by name.
    pub fn find(&self, name: &str) -> Option<&LockedPackage> {
        self.packages.iter().find(|p| p.name == name)
    }

    /// The packages to install when `excluded` groups are left out.
    pub fn runtime_packages(&self, excluded: &[String]) -> Vec<&LockedPackage> {
        self.packages
            .iter()
            .filter(|p| p.needed_without(excluded))
            .collect()
    }
}

/// Stable content hash over a manifest's dependency tables.
///
/// Feeds `group name requirement` lines in BTreeMap order, so formatting
/// and key order in the TOML file never change the hash.
pub fn manifest_content_hash(manifest: &ProjectManifest) -> String {
    let mut hasher = Sha256::new();
    for (group, name, req) in manifest.all_dependencies() {
        hasher.update(group.as_bytes());
        hasher.update(b" ");
        hasher.update(name.as_bytes());
        hasher.update(b" ");
        hasher.update(req.to_string().as_bytes());
        hasher.update(b"\n");
    }
    format!("sha256:{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lockfile_toml() {
        let lock: Lockfile = toml::from_str(
            r#"
            [metadata]
            manifest-hash = "sha256:abc"

            [[package]]
            name = "discord-py"
            version = "2.3.2"
            dependencies = ["aiohttp"]

            [[package]]
            name = "aiohttp"
            version = "3.9.1"
            "#,
        )
        .unwrap();

        assert_eq!(lock.metadata.manifest_hash, "sha256:abc");
        assert_eq!(lock.packages.len(), 2);
        assert_eq!(lock.find("aiohttp").unwrap().version, Version::new(3, 9, 1));
    }

    #[test]
    fn test_runtime_packages_excludes_dev_only() {
        let lock: Lockfile = toml::from_str(
            r#"
            [[package]]
            name = "motor"
            version = "3.3.0"
            groups = ["main"]

            [[package]]
            name = "black"
            version = "24.1.0"
            groups = ["dev"]

            [[package]]
            name = "typing-extensions"
            version = "4.9.0"
            groups = ["main", "dev"]
            "#,
        )
        .unwrap();

        let excluded = vec!["dev".to_string()];
        let runtime: Vec<_> = lock
            .runtime_packages(&excluded)
            .iter()
            .map(|p| p.name.clone())
            .collect();
        assert_eq!(runtime, vec!["motor", "typing-extensions"]);
    }

    #[test]
    fn test_package_without_groups_is_main() {
        let pkg = LockedPackage {
            name: "aiohttp".into(),
            ..Default::default()
        };
        assert!(pkg.needed_without(&["dev".to_string()]));
    }

    #[test]
    fn test_content_hash_ignores_formatting() {
        let a: ProjectManifest = toml::from_str(
            r#"
            [dependencies]
            motor = "^3.3"
            aiohttp = "*"
            "#,
        )
        .unwrap();
        let b: ProjectManifest = toml::from_str(
            r#"
            [dependencies]
            aiohttp = "*"
            motor   = "^3.3.0"
            "#,
        )
        .unwrap();
        // BTreeMap ordering and canonical requirement display make these equal.
        assert_eq!(manifest_content_hash(&a), manifest_content_hash(&b));
    }

    #[test]
    fn test_content_hash_changes_with_dependencies() {
        let a: ProjectManifest = toml::from_str("[dependencies]\nmotor = \"^3.3\"\n").unwrap();
        let b: ProjectManifest = toml::from_str("[dependencies]\nmotor = \"^3.4\"\n").unwrap();
        assert_ne!(manifest_content_hash(&a), manifest_content_hash(&b));
    }
}
