//! Domain layer for roost.
//!
//! Pure types and logic: the project manifest and lock-file model, version
//! requirement matching, lock consistency verification, the provisioning
//! plan, and the launch specification. No I/O lives here; adapters in the
//! infrastructure layer read files and spawn processes.

pub mod core;
pub mod launch;
pub mod manifest;
pub mod plan;

pub use crate::core::error::DomainError;
pub use launch::{LaunchSpec, PRELOAD_VAR, PreloadSpec, exit_code};
pub use manifest::lockfile::{LockMetadata, LockedPackage, Lockfile, manifest_content_hash};
pub use manifest::project::{DependencyGroup, ProjectManifest, ProjectMeta};
pub use manifest::verify::{LockError, verify};
pub use manifest::version::{Requirement, Version};
pub use plan::{ProvisionPlan, ProvisionReport, ProvisionStep, StepOutcome};
