//! Post-run analysis for turboq simulations
//!
//! Everything here consumes a finished [`turboq_core::SimulationRun`]:
//!
//! - [`theory`]: closed-form M/M/1/K loss and state probabilities
//! - [`state_distribution`]: time-weighted occupancy distribution of a run
//! - [`replication`]: independent replications with confidence intervals
//! - [`export`]: JSON and CSV writers
//!
//! # Example
//! ```
//! use turboq_core::{FixedRatePolicy, Router, RouterConfig};
//! use turboq_metrics::{StateDistribution, TheoreticalComparison};
//!
//! let config = RouterConfig::new(5.0, 3.0, 10);
//! let router = Router::with_policy(config, FixedRatePolicy::new(3.0))?;
//! let run = router.simulate(1.0e6, 2_000, Some(1))?;
//!
//! let comparison = TheoreticalComparison::new(run.config(), run.stats());
//! assert!(comparison.theoretical_loss_probability > 0.4);
//!
//! let dist = StateDistribution::from_history(run.occupancy());
//! assert!(dist.probabilities.len() <= 11);
//! # Ok::<(), turboq_core::SimError>(())
//! ```

pub mod error;
pub mod export;
pub mod replication;
pub mod state_distribution;
pub mod stats;
pub mod theory;

pub use error::MetricsError;
pub use export::{export_csv, export_json, CsvExporter, JsonExporter, RunExporter, RunRecord};
pub use replication::{
    replicate, replicate_with_confidence, MeanEstimate, ProportionEstimate, ReplicationSummary,
};
pub use state_distribution::StateDistribution;
pub use theory::{
    mm1k_loss_probability, mm1k_state_probabilities, traffic_intensity, TheoreticalComparison,
};
