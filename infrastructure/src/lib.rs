//! Infrastructure layer for roost
//!
//! Host adapters behind the application ports: TOML manifest store,
//! figment configuration loading, PATH/filesystem probing, the external
//! package-manager driver, workspace preparation, the foreground process
//! spawner, and the JSONL provision-report logger.

pub mod config;
pub mod installer;
pub mod logging;
pub mod probe;
pub mod spawner;
pub mod store;
pub mod workspace;

pub use config::{ConfigLoader, FileConfig};
pub use installer::CommandInstaller;
pub use logging::JsonlReportLogger;
pub use probe::HostProbe;
pub use spawner::ForegroundLauncher;
pub use store::TomlManifestStore;
pub use workspace::HostWorkspace;
