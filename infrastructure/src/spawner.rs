//! Foreground process spawner.
//!
//! Runs the entry script as the single foreground child with inherited
//! stdio, forwards SIGTERM/SIGINT, and maps the child's termination to the
//! supervisor's exit code.

use async_trait::async_trait;
use roost_application::ports::launcher::{LaunchError, ProcessLauncher};
use roost_domain::{LaunchSpec, exit_code};
use tokio::process::Command;
use tracing::{debug, info};

pub struct ForegroundLauncher;

#[async_trait]
impl ProcessLauncher for ForegroundLauncher {
    async fn run(&self, spec: &LaunchSpec) -> Result<i32, LaunchError> {
        let mut cmd = Command::new(&spec.program);
        cmd.arg(&spec.script).current_dir(&spec.working_dir);
        for (key, value) in &spec.env {
            cmd.env(key, value);
        }

        // Linux: request kernel to send SIGTERM to the child when the
        // supervisor dies. This catches cases where signal forwarding
        // never runs (SIGKILL, OOM kill).
        #[cfg(target_os = "linux")]
        unsafe {
            cmd.pre_exec(|| {
                libc::prctl(libc::PR_SET_PDEATHSIG, libc::SIGTERM);
                Ok(())
            });
        }

        debug!(program = %spec.program, script = %spec.script.display(), "spawning entry process");
        let mut child = cmd.spawn().map_err(|source| LaunchError::Spawn {
            program: spec.program.clone(),
            source,
        })?;

        #[cfg(unix)]
        {
            use tokio::signal::unix::{SignalKind, signal};

            let mut sigterm = signal(SignalKind::terminate())?;
            let mut sigint = signal(SignalKind::interrupt())?;

            loop {
                tokio::select! {
                    status = child.wait() => {
                        let status = status?;
                        return Ok(map_status(status));
                    }
                    _ = sigterm.recv() => {
                        info!("forwarding SIGTERM to entry process");
                        forward(&child, libc::SIGTERM);
                    }
                    _ = sigint.recv() => {
                        info!("forwarding SIGINT to entry process");
                        forward(&child, libc::SIGINT);
                    }
                }
            }
        }

        #[cfg(not(unix))]
        {
            let status = child.wait().await?;
            Ok(exit_code(status.code(), None))
        }
    }
}

#[cfg(unix)]
fn map_status(status: std::process::ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    exit_code(status.code(), status.signal())
}

#[cfg(unix)]
fn forward(child: &tokio::process::Child, signo: i32) {
    if let Some(pid) = child.id() {
        // SAFETY: pid is a live child of this process.
        unsafe {
            libc::kill(pid as i32, signo);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn script(dir: &tempfile::TempDir, body: &str) -> std::path::PathBuf {
        let path = dir.path().join("entry.sh");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "{}", body).unwrap();
        path
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_zero_exit_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let entry = script(&dir, "exit 0");
        let spec = LaunchSpec::new("sh", entry).with_working_dir(dir.path());

        let code = ForegroundLauncher.run(&spec).await.unwrap();
        assert_eq!(code, 0);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let entry = script(&dir, "exit 7");
        let spec = LaunchSpec::new("sh", entry).with_working_dir(dir.path());

        let code = ForegroundLauncher.run(&spec).await.unwrap();
        assert_eq!(code, 7);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_signal_death_maps_to_128_plus_signo() {
        let dir = tempfile::tempdir().unwrap();
        let entry = script(&dir, "kill -TERM $$");
        let spec = LaunchSpec::new("sh", entry).with_working_dir(dir.path());

        let code = ForegroundLauncher.run(&spec).await.unwrap();
        assert_eq!(code, 143);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_environment_reaches_the_child() {
        let dir = tempfile::tempdir().unwrap();
        let entry = script(&dir, r#"[ "$LD_PRELOAD" = "/lib/fake.so" ] || exit 9"#);
        let spec = LaunchSpec::new("sh", entry)
            .with_working_dir(dir.path())
            .with_env("LD_PRELOAD", "/lib/fake.so");

        let code = ForegroundLauncher.run(&spec).await.unwrap();
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_missing_interpreter_is_spawn_error() {
        let spec = LaunchSpec::new("definitely_not_a_real_command_xyz123", "bot.py");
        let err = ForegroundLauncher.run(&spec).await.unwrap_err();
        assert!(matches!(err, LaunchError::Spawn { .. }));
    }
}
