//! Provision report logging port.

use roost_domain::{ProvisionReport, StepOutcome};

/// Records provisioning outcomes durably (the infrastructure adapter
/// appends JSONL under the log directory).
pub trait ReportLogger: Send + Sync {
    /// Record one completed step.
    fn log_step(&self, outcome: &StepOutcome);

    /// Record the full report for a finished run.
    fn log_run(&self, report: &ProvisionReport);
}

/// Discards all report events.
pub struct NoReportLogger;

impl ReportLogger for NoReportLogger {
    fn log_step(&self, _outcome: &StepOutcome) {}
    fn log_run(&self, _report: &ProvisionReport) {}
}
