//! Launch specification and exit-status mapping.

use std::path::{Path, PathBuf};

/// Default name of the preload environment variable.
pub const PRELOAD_VAR: &str = "LD_PRELOAD";

/// How to start the entry process: interpreter, script, environment.
///
/// The entry script is opaque to roost; it is always invoked with no
/// arguments, as the container recipe did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSpec {
    /// Interpreter program, e.g. `python3`.
    pub program: String,
    /// Entry script path, relative to the working directory.
    pub script: PathBuf,
    /// Working directory for the child.
    pub working_dir: PathBuf,
    /// Environment additions applied on top of the inherited environment.
    pub env: Vec<(String, String)>,
}

impl LaunchSpec {
    pub fn new(program: impl Into<String>, script: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            script: script.into(),
            working_dir: PathBuf::from("."),
            env: Vec::new(),
        }
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = dir.into();
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }
}

/// Allocator preload: route the child's allocation calls through a
/// substitute allocator shared object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreloadSpec {
    /// Environment variable to set, normally [`PRELOAD_VAR`].
    pub var: String,
    /// Path to the allocator shared object.
    pub library: PathBuf,
}

impl PreloadSpec {
    pub fn new(library: impl Into<PathBuf>) -> Self {
        Self {
            var: PRELOAD_VAR.to_string(),
            library: library.into(),
        }
    }

    pub fn with_var(mut self, var: impl Into<String>) -> Self {
        self.var = var.into();
        self
    }

    pub fn library(&self) -> &Path {
        &self.library
    }

    /// The environment pair to apply to the launch spec.
    pub fn env_pair(&self) -> (String, String) {
        (self.var.clone(), self.library.display().to_string())
    }
}

/// Map a child's termination to the supervisor's exit code.
///
/// A normal exit propagates the code; death by signal maps to
/// `128 + signo`, matching shell and container-runtime convention.
pub fn exit_code(code: Option<i32>, signal: Option<i32>) -> i32 {
    match (code, signal) {
        (Some(code), _) => code,
        (None, Some(signo)) => 128 + signo,
        (None, None) => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_spec_builder() {
        let spec = LaunchSpec::new("python3", "bot.py")
            .with_working_dir("/app")
            .with_env("LD_PRELOAD", "/usr/lib/libjemalloc.so.2");

        assert_eq!(spec.program, "python3");
        assert_eq!(spec.script, PathBuf::from("bot.py"));
        assert_eq!(spec.env.len(), 1);
    }

    #[test]
    fn test_preload_env_pair() {
        let preload = PreloadSpec::new("/usr/lib/x86_64-linux-gnu/libjemalloc.so.2");
        let (var, value) = preload.env_pair();
        assert_eq!(var, "LD_PRELOAD");
        assert_eq!(value, "/usr/lib/x86_64-linux-gnu/libjemalloc.so.2");
    }

    #[test]
    fn test_exit_code_mapping() {
        assert_eq!(exit_code(Some(0), None), 0);
        assert_eq!(exit_code(Some(3), None), 3);
        // SIGTERM
        assert_eq!(exit_code(None, Some(15)), 143);
        assert_eq!(exit_code(None, None), 1);
    }
}
