//! Workspace preparation: the log directory.

use roost_application::ports::workspace::{WorkspaceError, WorkspacePort};
use std::path::Path;
use tracing::debug;

const WRITE_PROBE: &str = ".roost-write-probe";

/// Creates and checks directories on the real filesystem.
pub struct HostWorkspace;

impl WorkspacePort for HostWorkspace {
    fn ensure_log_dir(&self, path: &Path) -> Result<(), WorkspaceError> {
        std::fs::create_dir_all(path).map_err(|source| WorkspaceError::Create {
            path: path.to_path_buf(),
            source,
        })?;

        // The directory must be writable by the process user, not just
        // present. A short-lived probe file settles it.
        let probe = path.join(WRITE_PROBE);
        std::fs::write(&probe, b"probe").map_err(|source| WorkspaceError::NotWritable {
            path: path.to_path_buf(),
            source,
        })?;
        let _ = std::fs::remove_file(&probe);

        debug!(path = %path.display(), "log directory ready");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("logs");

        HostWorkspace.ensure_log_dir(&logs).unwrap();
        assert!(logs.is_dir());
        assert!(!logs.join(WRITE_PROBE).exists());
    }

    #[test]
    fn test_existing_directory_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        HostWorkspace.ensure_log_dir(dir.path()).unwrap();
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_unwritable_directory_fails() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("logs");
        std::fs::create_dir(&logs).unwrap();
        std::fs::set_permissions(&logs, std::fs::Permissions::from_mode(0o555)).unwrap();

        let result = HostWorkspace.ensure_log_dir(&logs);

        // Restore so the tempdir can be cleaned up.
        std::fs::set_permissions(&logs, std::fs::Permissions::from_mode(0o755)).unwrap();

        // Root bypasses permission bits; only assert when not root.
        if unsafe { libc::geteuid() } != 0 {
            assert!(matches!(result, Err(WorkspaceError::NotWritable { .. })));
        }
    }
}
