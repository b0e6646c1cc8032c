//! # turboq - threshold-controlled router simulation
//!
//! A discrete-event simulator of a single-server router with a finite
//! buffer (M/M/1/K) that doubles its service rate once the buffer is more
//! than half full.
//!
//! ## Quick Start
//!
//! ```
//! use turboq::prelude::*;
//!
//! let router = Router::new(RouterConfig::new(5.0, 3.0, 10))?;
//! let run = router.simulate(49.0, 200, Some(42))?;
//!
//! let stats = run.stats();
//! assert!(stats.packets_delivered + stats.packets_lost <= 200);
//! # Ok::<(), turboq::core::SimError>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: Includes `viz`
//! - `viz`: Text report and SVG charts
//!
//! ## Examples
//!
//! `cargo run --example router` runs the reference scenario and prints its report.

pub use turboq_core as core;

pub use turboq_metrics as metrics;

#[cfg(feature = "viz")]
pub use turboq_viz as viz;

/// Commonly used types and functions
pub mod prelude {
    pub use turboq_core::{
        init_simulation_logging, FixedRatePolicy, RatePolicy, Router, RouterConfig, RunOptions,
        SimTime, SimulationRun, SimulationStats, Termination, ThresholdPolicy,
    };

    pub use turboq_metrics::{replicate, StateDistribution, TheoreticalComparison};

    #[cfg(feature = "viz")]
    pub use turboq_viz::{print_report, RunReport};
}
