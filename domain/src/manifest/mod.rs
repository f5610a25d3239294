//! Manifest and lock-file model.
//!
//! A [`ProjectManifest`](project::ProjectManifest) declares what the bot
//! needs; a [`Lockfile`](lockfile::Lockfile) pins the fully resolved
//! transitive closure. [`verify`](verify::verify) checks the two against
//! each other before anything is installed.

pub mod lockfile;
pub mod project;
pub mod verify;
pub mod version;
