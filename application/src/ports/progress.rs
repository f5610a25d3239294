//! Provisioning progress port.
//!
//! Implementations live in the presentation layer and can display
//! progress in various ways (console spinner, plain logs).

use roost_domain::ProvisionStep;

/// Callback for progress updates during provisioning.
pub trait ProvisionProgress: Send + Sync {
    /// Called when a step starts. `index` is zero-based.
    fn on_step_start(&self, step: ProvisionStep, index: usize, total: usize);

    /// Called when a step completes successfully.
    fn on_step_complete(&self, step: ProvisionStep, detail: Option<&str>);

    /// Called when a step fails; provisioning aborts after this.
    fn on_step_failed(&self, step: ProvisionStep, error: &str);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProvisionProgress;

impl ProvisionProgress for NoProvisionProgress {
    fn on_step_start(&self, _step: ProvisionStep, _index: usize, _total: usize) {}
    fn on_step_complete(&self, _step: ProvisionStep, _detail: Option<&str>) {}
    fn on_step_failed(&self, _step: ProvisionStep, _error: &str) {}
}
