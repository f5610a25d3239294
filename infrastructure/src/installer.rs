//! External package-manager driver.
//!
//! The install itself is the dependency manager's job (`poetry install`
//! in the original recipe); this adapter only invokes it deterministically
//! and turns a non-zero exit into a fatal error.

use async_trait::async_trait;
use roost_application::config::InstallerSettings;
use roost_application::ports::installer::{DependencyInstaller, InstallRequest, InstallerError};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

/// How much stderr to keep in the error message.
const STDERR_TAIL: usize = 2000;

pub struct CommandInstaller {
    settings: InstallerSettings,
}

impl CommandInstaller {
    pub fn new(settings: InstallerSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl DependencyInstaller for CommandInstaller {
    async fn install(&self, request: &InstallRequest) -> Result<String, InstallerError> {
        let program = &self.settings.program;
        if which::which(program).is_err() {
            return Err(InstallerError::ManagerUnavailable(program.clone()));
        }

        let mut cmd = Command::new(program);
        cmd.args(&self.settings.args);
        for group in &request.excluded_groups {
            cmd.arg(&self.settings.group_flag).arg(group);
        }
        cmd.current_dir(&request.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        for (key, value) in &self.settings.env {
            cmd.env(key, value);
        }

        debug!(program, args = ?self.settings.args, "running package manager");
        let output = cmd.output().await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let mut start = stderr.len().saturating_sub(STDERR_TAIL);
            while !stderr.is_char_boundary(start) {
                start += 1;
            }
            let tail = &stderr[start..];
            return Err(InstallerError::InstallFailed {
                code: output.status.code().unwrap_or(-1),
                stderr: tail.trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let summary = stdout
            .lines()
            .rev()
            .find(|l| !l.trim().is_empty())
            .unwrap_or("ok")
            .trim()
            .to_string();
        info!(program, "install complete");
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn settings(program: &str, args: &[&str]) -> InstallerSettings {
        InstallerSettings {
            program: program.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
            group_flag: "--without".to_string(),
            excluded_groups: Vec::new(),
            env: Vec::new(),
        }
    }

    fn request() -> InstallRequest {
        InstallRequest {
            working_dir: PathBuf::from("."),
            excluded_groups: Vec::new(),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_successful_install_returns_summary() {
        let installer = CommandInstaller::new(settings("sh", &["-c", "echo installed 31 packages"]));
        let summary = installer.install(&request()).await.unwrap();
        assert_eq!(summary, "installed 31 packages");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_is_fatal_with_stderr() {
        let installer = CommandInstaller::new(settings(
            "sh",
            &["-c", "echo 'package flask-discord not available' >&2; exit 3"],
        ));
        let err = installer.install(&request()).await.unwrap_err();
        match err {
            InstallerError::InstallFailed { code, stderr } => {
                assert_eq!(code, 3);
                assert!(stderr.contains("not available"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_missing_manager_is_detected_before_running() {
        let installer =
            CommandInstaller::new(settings("definitely_not_a_real_command_xyz123", &[]));
        let err = installer.install(&request()).await.unwrap_err();
        assert!(matches!(err, InstallerError::ManagerUnavailable(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_excluded_groups_are_passed_as_flags() {
        // The shell echoes its arguments back; the group flags must be there.
        let installer = CommandInstaller::new(InstallerSettings {
            excluded_groups: Vec::new(),
            ..settings("sh", &["-c", "echo \"$0 $*\"", "install"])
        });
        let req = InstallRequest {
            working_dir: PathBuf::from("."),
            excluded_groups: vec!["dev".to_string()],
        };
        let summary = installer.install(&req).await.unwrap();
        assert!(summary.contains("--without dev"));
    }
}
