//! CLI entrypoint for roost
//!
//! This is the main binary that wires together all layers using
//! dependency injection, then propagates the entry process's exit code.

use anyhow::{Context, Result};
use clap::Parser;
use roost_application::ports::progress::{NoProvisionProgress, ProvisionProgress};
use roost_application::ports::report_log::{NoReportLogger, ReportLogger};
use roost_application::{LaunchUseCase, ProvisionUseCase, VerifyLockUseCase};
use roost_infrastructure::{
    CommandInstaller, ConfigLoader, ForegroundLauncher, HostProbe, HostWorkspace,
    JsonlReportLogger, TomlManifestStore,
};
use roost_presentation::{Cli, ConsoleFormatter, ProgressReporter, apply_cli_overrides, build_plan};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("failed to load configuration")?
    };
    let config = apply_cli_overrides(file_config.into_app_config(), &cli);

    // The supervisor's own log lives in the same logs directory the entry
    // script writes to. Provisioning re-checks writability later; this
    // create is best-effort so early logs have somewhere to go.
    let _ = std::fs::create_dir_all(config.log_directory());

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };
    let (file_writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::daily(
        config.log_directory(),
        "roost.log",
    ));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(fmt::layer().with_ansi(false).with_writer(file_writer))
        .init();

    info!("Starting roost");

    // === Dependency Injection ===
    let store = Arc::new(TomlManifestStore);

    if cli.verify_lock {
        let use_case = VerifyLockUseCase::new(store);
        let output = use_case.execute(&config)?;
        print!("{}", ConsoleFormatter::format_verify(&output));
        return Ok(());
    }

    let installer = Arc::new(CommandInstaller::new(config.installer.clone()));
    let report_logger: Arc<dyn ReportLogger> =
        match JsonlReportLogger::new(config.log_directory().join("provision.jsonl")) {
            Some(logger) => Arc::new(logger),
            None => Arc::new(NoReportLogger),
        };
    let provision = ProvisionUseCase::new(
        store,
        installer,
        Arc::new(HostProbe),
        Arc::new(HostWorkspace),
        report_logger,
    );

    let plan = build_plan(&config);
    let progress: Box<dyn ProvisionProgress> = if cli.quiet {
        Box::new(NoProvisionProgress)
    } else {
        Box::new(ProgressReporter::new())
    };

    let output = provision
        .execute(&config, &plan, progress.as_ref())
        .await
        .context("provisioning failed")?;

    if !cli.quiet {
        print!("{}", ConsoleFormatter::format_report(&output.report));
    }

    if cli.provision_only {
        return Ok(());
    }

    let launch = LaunchUseCase::new(Arc::new(ForegroundLauncher));
    let code = launch.execute(&config, output.env_additions).await?;

    // Flush the file appender before taking the exit code with us.
    drop(guard);
    std::process::exit(code);
}
