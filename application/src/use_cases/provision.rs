//! Provision use case.
//!
//! Runs the bootstrap sequence: system packages, log directory, dependency
//! install, allocator preload, environment preflight. Steps execute
//! strictly in order and the first failure aborts the run; the entry
//! process is never launched after a failed step.

use crate::config::AppConfig;
use crate::ports::installer::{DependencyInstaller, InstallRequest, InstallerError};
use crate::ports::probe::SystemProbe;
use crate::ports::progress::ProvisionProgress;
use crate::ports::report_log::ReportLogger;
use crate::ports::store::{ManifestStore, StoreError};
use crate::ports::workspace::{WorkspaceError, WorkspacePort};
use roost_domain::{LockError, ProvisionPlan, ProvisionReport, ProvisionStep, StepOutcome, verify};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("Required command '{0}' not found on PATH")]
    MissingCommand(String),

    #[error("Allocator shared object not found at {0}")]
    AllocatorNotFound(PathBuf),

    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Lock(#[from] LockError),

    #[error(transparent)]
    Installer(#[from] InstallerError),

    #[error("Required environment variables missing: {}", .0.join(", "))]
    MissingEnvironment(Vec<String>),
}

/// Result of a completed provisioning run.
#[derive(Debug)]
pub struct ProvisionOutput {
    pub report: ProvisionReport,
    /// Environment additions for the launch spec (the preload variable).
    pub env_additions: Vec<(String, String)>,
}

pub struct ProvisionUseCase<S: ManifestStore, I: DependencyInstaller> {
    store: Arc<S>,
    installer: Arc<I>,
    probe: Arc<dyn SystemProbe>,
    workspace: Arc<dyn WorkspacePort>,
    report_logger: Arc<dyn ReportLogger>,
}

impl<S: ManifestStore, I: DependencyInstaller> ProvisionUseCase<S, I> {
    pub fn new(
        store: Arc<S>,
        installer: Arc<I>,
        probe: Arc<dyn SystemProbe>,
        workspace: Arc<dyn WorkspacePort>,
        report_logger: Arc<dyn ReportLogger>,
    ) -> Self {
        Self {
            store,
            installer,
            probe,
            workspace,
            report_logger,
        }
    }

    pub async fn execute(
        &self,
        config: &AppConfig,
        plan: &ProvisionPlan,
        progress: &dyn ProvisionProgress,
    ) -> Result<ProvisionOutput, ProvisionError> {
        let mut report = ProvisionReport::default();
        let mut env_additions = Vec::new();
        let total = plan.len();

        for (index, step) in plan.steps().iter().copied().enumerate() {
            progress.on_step_start(step, index, total);
            let started = Instant::now();

            let result = self.run_step(step, config, &mut env_additions).await;
            let duration_ms = started.elapsed().as_millis() as u64;

            match result {
                Ok(detail) => {
                    info!(step = step.display_name(), duration_ms, "step complete");
                    progress.on_step_complete(step, detail.as_deref());
                    let outcome = StepOutcome {
                        step,
                        duration_ms,
                        detail,
                    };
                    self.report_logger.log_step(&outcome);
                    report.outcomes.push(outcome);
                }
                Err(e) => {
                    warn!(step = step.display_name(), error = %e, "step failed");
                    progress.on_step_failed(step, &e.to_string());
                    self.report_logger.log_run(&report);
                    return Err(e);
                }
            }
        }

        self.report_logger.log_run(&report);
        Ok(ProvisionOutput {
            report,
            env_additions,
        })
    }

    async fn run_step(
        &self,
        step: ProvisionStep,
        config: &AppConfig,
        env_additions: &mut Vec<(String, String)>,
    ) -> Result<Option<String>, ProvisionError> {
        match step {
            ProvisionStep::SystemPackages => self.check_system_packages(config),
            ProvisionStep::LogDirectory => {
                self.workspace.ensure_log_dir(&config.log_directory())?;
                Ok(Some(config.log_directory().display().to_string()))
            }
            ProvisionStep::DependencyInstall => self.install_dependencies(config).await,
            ProvisionStep::AllocatorPreload => self.prepare_preload(config, env_additions),
            ProvisionStep::EnvironmentCheck => self.check_environment(config),
        }
    }

    fn check_system_packages(&self, config: &AppConfig) -> Result<Option<String>, ProvisionError> {
        for command in &config.system_commands {
            if !self.probe.command_available(command) {
                return Err(ProvisionError::MissingCommand(command.clone()));
            }
        }
        Ok(Some(format!("{} commands", config.system_commands.len())))
    }

    async fn install_dependencies(
        &self,
        config: &AppConfig,
    ) -> Result<Option<String>, ProvisionError> {
        // Gate the install on a consistent lock: a stale or incomplete
        // lock must fail before the package manager runs.
        let manifest = self.store.load_manifest(&config.manifest_file())?;
        let lockfile = self.store.load_lockfile(&config.lock_file())?;
        verify(&manifest, &lockfile)?;

        let runtime = lockfile
            .runtime_packages(&config.installer.excluded_groups)
            .len();

        let request = InstallRequest {
            working_dir: config.working_dir.clone(),
            excluded_groups: config.installer.excluded_groups.clone(),
        };
        let summary = self.installer.install(&request).await?;
        info!(packages = runtime, "dependencies installed");

        Ok(Some(format!("{} packages ({})", runtime, summary)))
    }

    fn prepare_preload(
        &self,
        config: &AppConfig,
        env_additions: &mut Vec<(String, String)>,
    ) -> Result<Option<String>, ProvisionError> {
        let Some(preload) = &config.preload else {
            return Ok(Some("disabled".to_string()));
        };
        if !self.probe.library_exists(preload.library()) {
            return Err(ProvisionError::AllocatorNotFound(
                preload.library().to_path_buf(),
            ));
        }
        let (var, value) = preload.env_pair();
        let detail = format!("{}={}", var, value);
        env_additions.push((var, value));
        Ok(Some(detail))
    }

    fn check_environment(&self, config: &AppConfig) -> Result<Option<String>, ProvisionError> {
        let missing: Vec<String> = config
            .required_env
            .iter()
            .filter(|name| {
                let overridden = config.env_overrides.iter().any(|(k, _)| k == *name);
                !overridden && !self.probe.env_var_present(name)
            })
            .cloned()
            .collect();

        if !missing.is_empty() {
            return Err(ProvisionError::MissingEnvironment(missing));
        }
        Ok(Some(format!("{} variables", config.required_env.len())))
    }
}
