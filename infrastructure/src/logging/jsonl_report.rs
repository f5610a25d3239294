//! JSONL file writer for provisioning outcomes.
//!
//! Each step outcome is serialized as a single JSON line with a `type`
//! field and `timestamp`, appended to the file via a buffered writer.

use roost_application::ports::report_log::ReportLogger;
use roost_domain::{ProvisionReport, StepOutcome};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Provision-report logger that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes after every record so
/// a crashed run still leaves its trail.
pub struct JsonlReportLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlReportLogger {
    /// Create a logger appending to the given path.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be opened; report logging is
    /// best-effort and never blocks provisioning.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create report log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open report log file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_record(&self, record_type: &str, payload: serde_json::Value) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let record = if let serde_json::Value::Object(mut map) = payload {
            map.insert(
                "type".to_string(),
                serde_json::Value::String(record_type.to_string()),
            );
            map.insert(
                "timestamp".to_string(),
                serde_json::Value::String(timestamp),
            );
            serde_json::Value::Object(map)
        } else {
            serde_json::json!({
                "type": record_type,
                "timestamp": timestamp,
                "data": payload,
            })
        };

        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl ReportLogger for JsonlReportLogger {
    fn log_step(&self, outcome: &StepOutcome) {
        let payload = serde_json::to_value(outcome).unwrap_or(serde_json::Value::Null);
        self.write_record("step", payload);
    }

    fn log_run(&self, report: &ProvisionReport) {
        let payload = serde_json::to_value(report).unwrap_or(serde_json::Value::Null);
        self.write_record("run", payload);
    }
}
