//! CSV export for runs
//!
//! One file per table, suitable for spreadsheets and pandas:
//! - `{stem}_occupancy.csv` - `time_secs,packets`
//! - `{stem}_rates.csv` - `time_secs,rate`
//! - `{stem}_stats.csv` - `metric,value`

use crate::error::MetricsError;
use crate::export::RunExporter;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use turboq_core::SimulationRun;

#[derive(Debug)]
pub struct CsvExporter {
    path: PathBuf,
}

impl CsvExporter {
    /// `path` is a base name; its stem prefixes every file written.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    pub fn path_for_table(&self, suffix: &str) -> PathBuf {
        let stem = self
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("run");
        let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
        parent.join(format!("{stem}_{suffix}.csv"))
    }

    fn write_table(
        &self,
        suffix: &str,
        header: &str,
        rows: impl Iterator<Item = String>,
    ) -> Result<(), MetricsError> {
        let path = self.path_for_table(suffix);
        let file = File::create(&path)
            .map_err(|e| MetricsError::ExportError(format!("Failed to create file: {e}")))?;
        let mut out = BufWriter::new(file);

        writeln!(out, "{header}")
            .map_err(|e| MetricsError::ExportError(format!("Failed to write header: {e}")))?;
        for row in rows {
            writeln!(out, "{row}")
                .map_err(|e| MetricsError::ExportError(format!("Failed to write row: {e}")))?;
        }
        out.flush()?;
        Ok(())
    }
}

impl RunExporter for CsvExporter {
    fn export(&self, run: &SimulationRun) -> Result<(), MetricsError> {
        self.write_table(
            "occupancy",
            "time_secs,packets",
            run.occupancy()
                .iter()
                .map(|s| format!("{},{}", s.time.as_secs_f64(), s.packets)),
        )?;

        self.write_table(
            "rates",
            "time_secs,rate",
            run.rates()
                .iter()
                .map(|s| format!("{},{}", s.time.as_secs_f64(), s.rate)),
        )?;

        let stats = run.stats();
        let metrics: [(&str, String); 14] = [
            ("policy", run.policy_name().to_string()),
            ("capacity", run.config().capacity.to_string()),
            ("termination", run.termination().as_str().to_string()),
            ("events_processed", run.events_processed().to_string()),
            ("packets_delivered", stats.packets_delivered.to_string()),
            ("packets_lost", stats.packets_lost.to_string()),
            ("total_packets", stats.total_packets.to_string()),
            ("drop_probability", stats.drop_probability.to_string()),
            ("simulation_duration_secs", stats.simulation_duration.to_string()),
            ("utilization", stats.utilization.to_string()),
            ("throughput", stats.throughput.to_string()),
            ("avg_waiting_time_secs", stats.avg_waiting_time.to_string()),
            ("rate_mean", stats.rate_mean.to_string()),
            ("rate_std_dev", stats.rate_std_dev.to_string()),
        ];
        self.write_table(
            "stats",
            "metric,value",
            metrics
                .into_iter()
                .map(|(name, value)| format!("{},{}", escape_csv(name), escape_csv(&value))),
        )?;

        tracing::debug!(base = %self.path.display(), "Exported run to CSV");
        Ok(())
    }
}

/// Quote a field if it contains a separator, quote or newline
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
