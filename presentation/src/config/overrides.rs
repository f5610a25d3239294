//! Applies CLI flags on top of file configuration.
//!
//! CLI flags always win over file values; the use cases only ever see the
//! resolved [`AppConfig`].

use crate::cli::commands::Cli;
use roost_application::AppConfig;
use roost_domain::ProvisionPlan;

/// Apply CLI overrides to a config resolved from files.
pub fn apply_cli_overrides(mut config: AppConfig, cli: &Cli) -> AppConfig {
    if let Some(entry) = &cli.entry {
        config.entry = entry.clone();
    }
    if let Some(logs_dir) = &cli.logs_dir {
        config.logs_dir = logs_dir.clone();
    }
    if let Some(working_dir) = &cli.working_dir {
        config.working_dir = working_dir.clone();
    }
    if cli.skip_preload {
        config.preload = None;
    }
    config
}

/// Build the provisioning plan for this run.
///
/// The preload step is dropped when preloading is disabled, and the
/// environment preflight is dropped when nothing is required.
pub fn build_plan(config: &AppConfig) -> ProvisionPlan {
    let mut plan = ProvisionPlan::default();
    if config.preload.is_none() {
        plan = plan.without_preload();
    }
    if config.required_env.is_empty() && config.env_overrides.is_empty() {
        plan = plan.without_environment_check();
    }
    plan
}
