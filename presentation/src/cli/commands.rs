//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for roost
#[derive(Parser, Debug)]
#[command(name = "roost")]
#[command(author, version, about = "Provision a reproducible bot runtime and run it")]
#[command(long_about = r#"
Roost provisions the runtime environment for a single long-running bot
process and then runs it as the foreground child, propagating its exit code.

Provisioning runs as a strict sequence, each step gating the next:
1. System packages: required host commands on PATH
2. Log directory: ./logs exists and is writable
3. Dependency install: locked, non-dev dependencies into the shared runtime
4. Allocator preload: LD_PRELOAD pointed at the substitute allocator
5. Environment check: variables the entry script requires are present

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./roost.toml        Project-level config
3. ~/.config/roost/config.toml   Global config

Example:
  roost                      # provision, then run bot.py in the foreground
  roost --provision-only     # stop after provisioning
  roost --verify-lock        # check manifest/lock consistency and exit
"#)]
pub struct Cli {
    /// Provision the environment but do not launch the entry process
    #[arg(long)]
    pub provision_only: bool,

    /// Verify manifest/lock consistency and exit
    #[arg(long)]
    pub verify_lock: bool,

    /// Skip the allocator preload step
    #[arg(long)]
    pub skip_preload: bool,

    /// Entry script to launch (overrides config)
    #[arg(long, value_name = "SCRIPT")]
    pub entry: Option<PathBuf>,

    /// Log directory (overrides config)
    #[arg(long, value_name = "DIR")]
    pub logs_dir: Option<PathBuf>,

    /// Working directory for provisioning and the entry process
    #[arg(long, value_name = "DIR")]
    pub working_dir: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
