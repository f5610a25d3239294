//! Host system probe: PATH lookups, file existence, process environment.

use roost_application::ports::probe::SystemProbe;
use std::path::Path;

pub struct HostProbe;

impl SystemProbe for HostProbe {
    fn command_available(&self, name: &str) -> bool {
        which::which(name).is_ok()
    }

    fn library_exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn env_var_present(&self, name: &str) -> bool {
        std::env::var(name).map(|v| !v.is_empty()).unwrap_or(false)
    }
}
