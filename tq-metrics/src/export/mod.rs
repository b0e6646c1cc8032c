//! Export of finished runs
//!
//! Exporters write a [`SimulationRun`] to disk so the histories can be
//! inspected with external tools.

pub mod csv;
pub mod json;

use crate::error::MetricsError;
use serde::Serialize;
use std::path::Path;
use turboq_core::{
    OccupancySample, RateSample, RouterConfig, RunOptions, ServerPhase, SimulationRun,
    SimulationStats, Termination,
};

pub use self::csv::CsvExporter;
pub use self::json::JsonExporter;

/// Trait for writing a run to a configured destination
pub trait RunExporter {
    fn export(&self, run: &SimulationRun) -> Result<(), MetricsError>;
}

/// Serializable view of a whole run.
#[derive(Debug, Serialize)]
pub struct RunRecord<'a> {
    pub policy: &'static str,
    pub config: &'a RouterConfig,
    pub options: &'a RunOptions,
    pub termination: Termination,
    pub final_phase: ServerPhase,
    pub events_processed: u64,
    pub stats: &'a SimulationStats,
    pub occupancy: &'a [OccupancySample],
    pub rates: &'a [RateSample],
}

impl<'a> From<&'a SimulationRun> for RunRecord<'a> {
    fn from(run: &'a SimulationRun) -> Self {
        Self {
            policy: run.policy_name(),
            config: run.config(),
            options: run.options(),
            termination: run.termination(),
            final_phase: run.final_phase(),
            events_processed: run.events_processed(),
            stats: run.stats(),
            occupancy: run.occupancy(),
            rates: run.rates(),
        }
    }
}

/// Export a run to a single JSON document
///
/// # Example
/// ```no_run
/// use turboq_core::{Router, RouterConfig};
/// use turboq_metrics::export::export_json;
///
/// let run = Router::new(RouterConfig::default())?.simulate(49.0, 200, Some(42))?;
/// export_json(&run, "results/run.json", true)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn export_json(
    run: &SimulationRun,
    path: impl AsRef<Path>,
    pretty: bool,
) -> Result<(), MetricsError> {
    JsonExporter::new(path.as_ref(), pretty).export(run)
}

/// Export a run to `{stem}_occupancy.csv`, `{stem}_rates.csv` and `{stem}_stats.csv`
/// next to `path`
pub fn export_csv(run: &SimulationRun, path: impl AsRef<Path>) -> Result<(), MetricsError> {
    CsvExporter::new(path.as_ref()).export(run)
}
