//! Application layer for roost
//!
//! This crate contains use cases, port definitions, and application
//! configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{AppConfig, InstallerSettings};
pub use ports::{
    installer::{DependencyInstaller, InstallRequest, InstallerError},
    launcher::{LaunchError, ProcessLauncher},
    probe::SystemProbe,
    progress::{NoProvisionProgress, ProvisionProgress},
    report_log::{NoReportLogger, ReportLogger},
    store::{ManifestStore, StoreError},
    workspace::{WorkspaceError, WorkspacePort},
};
pub use use_cases::launch::LaunchUseCase;
pub use use_cases::provision::{ProvisionError, ProvisionOutput, ProvisionUseCase};
pub use use_cases::verify_lock::{VerifyLockError, VerifyLockOutput, VerifyLockUseCase};
