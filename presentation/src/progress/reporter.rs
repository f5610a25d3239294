//! Progress reporting for provisioning

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use roost_application::ports::progress::ProvisionProgress;
use roost_domain::ProvisionStep;
use std::sync::Mutex;

/// Reports provisioning progress with a progress bar
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-")
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProvisionProgress for ProgressReporter {
    fn on_step_start(&self, step: ProvisionStep, index: usize, total: usize) {
        let mut guard = self.bar.lock().unwrap();
        let bar = guard.get_or_insert_with(|| {
            let bar = ProgressBar::new(total as u64);
            bar.set_style(Self::style());
            bar.set_prefix("Provisioning");
            bar
        });
        bar.set_position(index as u64);
        bar.set_message(step.display_name().to_string());
    }

    fn on_step_complete(&self, step: ProvisionStep, detail: Option<&str>) {
        if let Some(bar) = self.bar.lock().unwrap().as_ref() {
            let status = match detail {
                Some(detail) => format!("{} {} ({})", "v".green(), step.display_name(), detail),
                None => format!("{} {}", "v".green(), step.display_name()),
            };
            bar.set_message(status);
            bar.inc(1);
        }
    }

    fn on_step_failed(&self, step: ProvisionStep, error: &str) {
        if let Some(bar) = self.bar.lock().unwrap().take() {
            bar.abandon_with_message(format!("{} {}: {}", "x".red(), step.display_name(), error));
        }
    }
}

/// Plain-line progress for terminals where a bar is unwanted
pub struct SimpleProgress;

impl ProvisionProgress for SimpleProgress {
    fn on_step_start(&self, step: ProvisionStep, index: usize, total: usize) {
        println!("[{}/{}] {}...", index + 1, total, step.display_name());
    }

    fn on_step_complete(&self, step: ProvisionStep, detail: Option<&str>) {
        match detail {
            Some(detail) => println!("  done: {} ({})", step.display_name(), detail),
            None => println!("  done: {}", step.display_name()),
        }
    }

    fn on_step_failed(&self, step: ProvisionStep, error: &str) {
        eprintln!("  failed: {}: {}", step.display_name(), error);
    }
}
