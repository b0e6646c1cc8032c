//! JSON export for runs

use crate::error::MetricsError;
use crate::export::{RunExporter, RunRecord};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use turboq_core::SimulationRun;

/// Writes the configuration, statistics and both histories as one JSON document
#[derive(Debug)]
pub struct JsonExporter {
    path: PathBuf,
    pretty: bool,
}

impl JsonExporter {
    /// # Arguments
    /// * `path` - Output file path
    /// * `pretty` - Whether to pretty-print the JSON
    pub fn new(path: &Path, pretty: bool) -> Self {
        Self {
            path: path.to_path_buf(),
            pretty,
        }
    }

    pub fn to_json_string(&self, run: &SimulationRun) -> Result<String, MetricsError> {
        let record = RunRecord::from(run);
        let json = if self.pretty {
            serde_json::to_string_pretty(&record)
        } else {
            serde_json::to_string(&record)
        }?;
        Ok(json)
    }
}

impl RunExporter for JsonExporter {
    fn export(&self, run: &SimulationRun) -> Result<(), MetricsError> {
        let json = self.to_json_string(run)?;

        let mut file = File::create(&self.path)
            .map_err(|e| MetricsError::ExportError(format!("Failed to create file: {e}")))?;
        file.write_all(json.as_bytes())
            .map_err(|e| MetricsError::ExportError(format!("Failed to write to file: {e}")))?;

        tracing::debug!(path = %self.path.display(), bytes = json.len(), "Exported run to JSON");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use turboq_core::{Router, RouterConfig};

    #[test]
    fn document_contains_stats_and_histories() {
        let run = Router::new(RouterConfig::default())
            .unwrap()
            .simulate(20.0, 50, Some(4))
            .unwrap();
        let json = JsonExporter::new(Path::new("unused.json"), false)
            .to_json_string(&run)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(
            value["stats"]["packets_delivered"].as_u64(),
            Some(run.stats().packets_delivered)
        );
        assert_eq!(
            value["occupancy"].as_array().map(Vec::len),
            Some(run.occupancy().len())
        );
        assert_eq!(value["rates"].as_array().map(Vec::len), Some(run.rates().len()));
        assert_eq!(value["config"]["capacity"].as_u64(), Some(10));
    }

    #[test]
    fn unwritable_path_is_an_export_error() {
        let run = Router::new(RouterConfig::default())
            .unwrap()
            .simulate(5.0, 10, Some(1))
            .unwrap();
        let exporter = JsonExporter::new(Path::new("/nonexistent-dir/run.json"), true);
        assert!(matches!(
            exporter.export(&run),
            Err(MetricsError::ExportError(_))
        ));
    }
}
