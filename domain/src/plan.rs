//! Provisioning plan and report.
//!
//! Provisioning is a linear, one-shot sequence: each step gates the next,
//! and the first failure aborts the run before the entry process is
//! spawned. The report records what ran and how long it took.

use serde::{Deserialize, Serialize};

/// One step of the provisioning sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProvisionStep {
    /// Required host commands resolvable on PATH.
    SystemPackages,
    /// `logs/` exists under the working directory and is writable.
    LogDirectory,
    /// Locked, non-dev dependencies installed into the shared environment.
    DependencyInstall,
    /// Preload environment variable prepared for the entry process.
    AllocatorPreload,
    /// Environment variables the entry script requires are present.
    EnvironmentCheck,
}

impl ProvisionStep {
    pub fn display_name(&self) -> &'static str {
        match self {
            ProvisionStep::SystemPackages => "system packages",
            ProvisionStep::LogDirectory => "log directory",
            ProvisionStep::DependencyInstall => "dependency install",
            ProvisionStep::AllocatorPreload => "allocator preload",
            ProvisionStep::EnvironmentCheck => "environment check",
        }
    }
}

/// The ordered step sequence for one provisioning run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionPlan {
    steps: Vec<ProvisionStep>,
}

impl Default for ProvisionPlan {
    fn default() -> Self {
        Self {
            steps: vec![
                ProvisionStep::SystemPackages,
                ProvisionStep::LogDirectory,
                ProvisionStep::DependencyInstall,
                ProvisionStep::AllocatorPreload,
                ProvisionStep::EnvironmentCheck,
            ],
        }
    }
}

impl ProvisionPlan {
    pub fn steps(&self) -> &[ProvisionStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Drop the allocator preload step (`--skip-preload`).
    pub fn without_preload(mut self) -> Self {
        self.steps.retain(|s| *s != ProvisionStep::AllocatorPreload);
        self
    }

    /// Drop the environment preflight when no variables are configured.
    pub fn without_environment_check(mut self) -> Self {
        self.steps.retain(|s| *s != ProvisionStep::EnvironmentCheck);
        self
    }
}

/// Outcome of a single completed step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepOutcome {
    pub step: ProvisionStep,
    pub duration_ms: u64,
    /// Human-readable detail, e.g. the number of packages installed.
    pub detail: Option<String>,
}

/// Record of a provisioning run. Only completed steps appear; a failed
/// run's report ends at the last step that succeeded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProvisionReport {
    pub outcomes: Vec<StepOutcome>,
}

impl ProvisionReport {
    pub fn record(&mut self, step: ProvisionStep, duration_ms: u64, detail: Option<String>) {
        self.outcomes.push(StepOutcome {
            step,
            duration_ms,
            detail,
        });
    }

    pub fn completed(&self, step: ProvisionStep) -> bool {
        self.outcomes.iter().any(|o| o.step == step)
    }

    pub fn total_duration_ms(&self) -> u64 {
        self.outcomes.iter().map(|o| o.duration_ms).sum()
    }
}
