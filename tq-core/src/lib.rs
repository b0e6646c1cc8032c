//! Discrete-event engine for a threshold-controlled M/M/1/K router.
//!
//! The router is a single server with `K - 1` buffer slots. Packets arrive as
//! a Poisson process; service times are exponential at a rate picked by a
//! [`RatePolicy`] from the current buffer length. The default
//! [`ThresholdPolicy`] doubles the service rate while more than `K / 2`
//! packets are waiting.
//!
//! # Architecture Overview
//!
//! - [`ProcessGenerator`]: seeded source of arrival times and service durations.
//! - [`select_rate`] / [`RatePolicy`]: the rate controller.
//! - [`EventScheduler`]: min-heap of pending events, ties broken by insertion order.
//! - [`Router`]: owns the configuration and runs the state machine.
//! - [`SimulationStats`]: metrics derived once a run has finished.
//!
//! # Basic Usage
//!
//! ```rust
//! use turboq_core::{Router, RouterConfig, RunOptions};
//!
//! let router = Router::new(RouterConfig::new(5.0, 3.0, 10))?;
//! let run = router.run(&RunOptions::new(49.0, 200).with_seed(42))?;
//!
//! let stats = run.stats();
//! assert!((0.0..=1.0).contains(&stats.drop_probability));
//! # Ok::<(), turboq_core::SimError>(())
//! ```
//!
//! # Time Model
//!
//! Timestamps are [`SimTime`] values (nanoseconds of simulated time); rates
//! are per simulated second. Nothing in a run depends on wall-clock time.

pub mod config;
pub mod dists;
pub mod engine;
pub mod error;
pub mod logging;
pub mod policy;
pub mod scheduler;
pub mod stats;
pub mod time;
pub mod types;

pub use config::{RouterConfig, RunOptions};
pub use dists::ProcessGenerator;
pub use engine::{Router, SimulationRun};
pub use error::{EventError, SimError};
pub use logging::{
    event_span, init_detailed_simulation_logging, init_simulation_logging,
    init_simulation_logging_with_level, simulation_span,
};
pub use policy::{select_rate, FixedRatePolicy, RatePolicy, ThresholdPolicy};
pub use scheduler::{EventEntry, EventScheduler};
pub use stats::{Counters, SimulationStats};
pub use time::SimTime;
pub use types::{Event, EventId, OccupancySample, RateSample, ServerPhase, Termination};
