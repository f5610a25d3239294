//! Resolved application configuration.
//!
//! The presentation layer merges file config and CLI flags into this
//! struct; use cases only ever see the resolved form.

use roost_domain::PreloadSpec;
use std::path::PathBuf;

/// Everything a provisioning-and-launch run needs to know.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Working directory for provisioning and the entry process.
    pub working_dir: PathBuf,
    /// Project manifest path, relative to the working directory.
    pub manifest_path: PathBuf,
    /// Lock file path, relative to the working directory.
    pub lock_path: PathBuf,
    /// Log directory, relative to the working directory.
    pub logs_dir: PathBuf,
    /// Interpreter for the entry script.
    pub interpreter: String,
    /// Entry script, invoked with no arguments.
    pub entry: PathBuf,
    /// Allocator preload, if enabled.
    pub preload: Option<PreloadSpec>,
    /// Host commands that must resolve on PATH.
    pub system_commands: Vec<String>,
    /// External package-manager invocation.
    pub installer: InstallerSettings,
    /// Environment variables the entry script requires at startup.
    pub required_env: Vec<String>,
    /// Static environment overrides applied to the child.
    pub env_overrides: Vec<(String, String)>,
}

/// How to drive the external dependency manager.
#[derive(Debug, Clone)]
pub struct InstallerSettings {
    /// Package-manager program, e.g. `poetry`.
    pub program: String,
    /// Arguments before the group exclusions, e.g. `["install", "--no-root"]`.
    pub args: Vec<String>,
    /// Flag used to exclude a group, e.g. `--without`.
    pub group_flag: String,
    /// Dependency groups excluded from the install.
    pub excluded_groups: Vec<String>,
    /// Environment for the package manager. The default disables
    /// virtualenv creation so packages land in the shared runtime.
    pub env: Vec<(String, String)>,
}

impl Default for InstallerSettings {
    fn default() -> Self {
        Self {
            program: "poetry".to_string(),
            args: vec!["install".to_string(), "--no-root".to_string()],
            group_flag: "--without".to_string(),
            excluded_groups: vec!["dev".to_string()],
            env: vec![("POETRY_VIRTUALENVS_CREATE".to_string(), "false".to_string())],
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            working_dir: PathBuf::from("."),
            manifest_path: PathBuf::from("manifest.toml"),
            lock_path: PathBuf::from("roost.lock"),
            logs_dir: PathBuf::from("logs"),
            interpreter: "python3".to_string(),
            entry: PathBuf::from("bot.py"),
            preload: Some(PreloadSpec::new(
                "/usr/lib/x86_64-linux-gnu/libjemalloc.so.2",
            )),
            system_commands: vec!["git".to_string()],
            installer: InstallerSettings::default(),
            // Variables the stock entry script reads unconditionally at
            // startup. A missing one is a guaranteed crash after launch.
            required_env: vec![
                "BOT_TOKEN".to_string(),
                "PREFIX".to_string(),
                "DATABASE_NAME".to_string(),
                "POKETWO_DATABASE_NAME".to_string(),
                "REDIS_URI".to_string(),
                "POKETWO_REDIS_URI".to_string(),
            ],
            env_overrides: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Absolute-ish path helpers: everything is resolved against the
    /// working directory.
    pub fn manifest_file(&self) -> PathBuf {
        self.working_dir.join(&self.manifest_path)
    }

    pub fn lock_file(&self) -> PathBuf {
        self.working_dir.join(&self.lock_path)
    }

    pub fn log_directory(&self) -> PathBuf {
        self.working_dir.join(&self.logs_dir)
    }
}
