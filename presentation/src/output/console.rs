//! Console formatting for provisioning results.

use colored::Colorize;
use roost_application::VerifyLockOutput;
use roost_domain::ProvisionReport;

/// Formats run results for the terminal.
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// One line per completed step, plus a total.
    pub fn format_report(report: &ProvisionReport) -> String {
        let mut out = String::new();
        for outcome in &report.outcomes {
            let name = outcome.step.display_name();
            let line = match &outcome.detail {
                Some(detail) => format!(
                    "  {} {} ({} ms) - {}\n",
                    "v".green(),
                    name,
                    outcome.duration_ms,
                    detail
                ),
                None => format!("  {} {} ({} ms)\n", "v".green(), name, outcome.duration_ms),
            };
            out.push_str(&line);
        }
        out.push_str(&format!(
            "Provisioned in {} ms\n",
            report.total_duration_ms()
        ));
        out
    }

    pub fn format_verify(output: &VerifyLockOutput) -> String {
        format!(
            "{} lock file consistent: {} packages ({} runtime)\n",
            "v".green(),
            output.packages,
            output.runtime_packages
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roost_domain::ProvisionStep;

    #[test]
    fn test_report_lists_steps_and_total() {
        let mut report = ProvisionReport::default();
        report.record(ProvisionStep::LogDirectory, 2, None);
        report.record(
            ProvisionStep::DependencyInstall,
            900,
            Some("31 packages".to_string()),
        );

        let out = ConsoleFormatter::format_report(&report);
        assert!(out.contains("log directory"));
        assert!(out.contains("31 packages"));
        assert!(out.contains("Provisioned in 902 ms"));
    }

    #[test]
    fn test_verify_summary() {
        let out = ConsoleFormatter::format_verify(&VerifyLockOutput {
            packages: 40,
            runtime_packages: 31,
        });
        assert!(out.contains("40 packages"));
        assert!(out.contains("31 runtime"));
    }
}
