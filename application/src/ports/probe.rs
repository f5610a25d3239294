//! Host system probe port.

use std::path::Path;

/// Read-only checks against the host: PATH lookups, file existence,
/// process environment.
pub trait SystemProbe: Send + Sync {
    /// Whether `name` resolves to an executable on PATH.
    fn command_available(&self, name: &str) -> bool;

    /// Whether the shared object at `path` exists.
    fn library_exists(&self, path: &Path) -> bool;

    /// Whether the environment variable `name` is set and non-empty.
    fn env_var_present(&self, name: &str) -> bool;
}
