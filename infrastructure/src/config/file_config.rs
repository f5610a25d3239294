//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into the resolved
//! [`AppConfig`] the use cases consume.

use roost_application::config::{AppConfig, InstallerSettings};
use roost_domain::{PRELOAD_VAR, PreloadSpec};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Raw project section from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProjectConfig {
    /// Working directory for provisioning and the entry process
    pub working_dir: PathBuf,
    /// Manifest path, relative to the working directory
    pub manifest: PathBuf,
    /// Lock file path, relative to the working directory
    pub lock: PathBuf,
}

impl Default for FileProjectConfig {
    fn default() -> Self {
        Self {
            working_dir: PathBuf::from("."),
            manifest: PathBuf::from("manifest.toml"),
            lock: PathBuf::from("roost.lock"),
        }
    }
}

/// Raw runtime section from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRuntimeConfig {
    /// Interpreter for the entry script
    pub interpreter: String,
    /// Entry script, invoked with no arguments
    pub entry: PathBuf,
    /// Log directory, relative to the working directory
    pub logs_dir: PathBuf,
}

impl Default for FileRuntimeConfig {
    fn default() -> Self {
        Self {
            interpreter: "python3".to_string(),
            entry: PathBuf::from("bot.py"),
            logs_dir: PathBuf::from("logs"),
        }
    }
}

/// Raw allocator section from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAllocatorConfig {
    /// Whether to preload a substitute allocator
    pub enabled: bool,
    /// Path to the allocator shared object
    pub library: PathBuf,
    /// Environment variable carrying the preload path
    pub var: String,
}

impl Default for FileAllocatorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            library: PathBuf::from("/usr/lib/x86_64-linux-gnu/libjemalloc.so.2"),
            var: PRELOAD_VAR.to_string(),
        }
    }
}

/// Raw installer section from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileInstallerConfig {
    /// Package-manager program
    pub program: String,
    /// Arguments before group exclusions
    pub args: Vec<String>,
    /// Flag used to exclude a group
    pub group_flag: String,
    /// Groups excluded from the install
    pub exclude_groups: Vec<String>,
    /// Environment for the package manager
    pub env: BTreeMap<String, String>,
}

impl Default for FileInstallerConfig {
    fn default() -> Self {
        let defaults = InstallerSettings::default();
        Self {
            program: defaults.program,
            args: defaults.args,
            group_flag: defaults.group_flag,
            exclude_groups: defaults.excluded_groups,
            env: defaults.env.into_iter().collect(),
        }
    }
}

/// Raw system section from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSystemConfig {
    /// Host commands that must resolve on PATH
    pub commands: Vec<String>,
}

impl Default for FileSystemConfig {
    fn default() -> Self {
        Self {
            commands: vec!["git".to_string()],
        }
    }
}

/// Raw environment section from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEnvironmentConfig {
    /// Variables the entry script requires at startup
    pub required: Vec<String>,
    /// Static overrides applied to the child environment
    pub overrides: BTreeMap<String, String>,
}

impl Default for FileEnvironmentConfig {
    fn default() -> Self {
        Self {
            required: AppConfig::default().required_env,
            overrides: BTreeMap::new(),
        }
    }
}

/// Raw top-level configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub project: FileProjectConfig,
    pub runtime: FileRuntimeConfig,
    pub allocator: FileAllocatorConfig,
    pub installer: FileInstallerConfig,
    pub system: FileSystemConfig,
    pub environment: FileEnvironmentConfig,
}

impl FileConfig {
    /// Convert into the resolved configuration the use cases consume.
    pub fn into_app_config(self) -> AppConfig {
        let preload = if self.allocator.enabled {
            Some(PreloadSpec::new(self.allocator.library).with_var(self.allocator.var))
        } else {
            None
        };

        AppConfig {
            working_dir: self.project.working_dir,
            manifest_path: self.project.manifest,
            lock_path: self.project.lock,
            logs_dir: self.runtime.logs_dir,
            interpreter: self.runtime.interpreter,
            entry: self.runtime.entry,
            preload,
            system_commands: self.system.commands,
            installer: InstallerSettings {
                program: self.installer.program,
                args: self.installer.args,
                group_flag: self.installer.group_flag,
                excluded_groups: self.installer.exclude_groups,
                env: self.installer.env.into_iter().collect(),
            },
            required_env: self.environment.required,
            env_overrides: self.environment.overrides.into_iter().collect(),
        }
    }
}
