//! Project manifest data types.
//!
//! These structs represent the exact structure of the manifest TOML file.
//! Requirements deserialize directly into domain types.

use crate::manifest::version::Requirement;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The declarative project manifest: what the bot needs to run.
///
/// ```toml
/// [project]
/// name = "guiduck"
/// version = "1.0.0"
///
/// [dependencies]
/// "discord-py" = "^2.3"
/// motor = "^3.3"
///
/// [groups.dev.dependencies]
/// black = "^24.0"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectManifest {
    pub project: ProjectMeta,
    /// Runtime dependencies: name -> requirement.
    pub dependencies: BTreeMap<String, Requirement>,
    /// Optional dependency groups (e.g. `dev`), excludable at install time.
    pub groups: BTreeMap<String, DependencyGroup>,
}

/// Project name and version.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectMeta {
    pub name: String,
    pub version: String,
}

/// A named group of dependencies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DependencyGroup {
    pub dependencies: BTreeMap<String, Requirement>,
}

impl ProjectManifest {
    /// All declared dependencies with the group that declared them.
    ///
    /// Runtime dependencies are reported under the implicit group `"main"`.
    pub fn all_dependencies(&self) -> impl Iterator<Item = (&str, &str, &Requirement)> {
        self.dependencies
            .iter()
            .map(|(name, req)| ("main", name.as_str(), req))
            .chain(self.groups.iter().flat_map(|(group, deps)| {
                deps.dependencies
                    .iter()
                    .map(move |(name, req)| (group.as_str(), name.as_str(), req))
            }))
    }
}
