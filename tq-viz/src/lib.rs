//! Reports and charts for turboq runs
//!
//! - [`report`]: the end-of-run text report, with the M/M/1/K comparison
//! - [`charts`]: SVG charts of the occupancy history and the state distribution
//!
//! # Example
//!
//! ```no_run
//! use turboq_core::{Router, RouterConfig};
//! use turboq_viz::{charts::generate_all_charts, report::print_report};
//!
//! let run = Router::new(RouterConfig::default())?.simulate(49.0, 200, Some(42))?;
//! print_report(&run);
//! generate_all_charts(&run, "output/charts")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod charts;
pub mod error;
pub mod report;

pub use error::VizError;
pub use report::{print_report, RunReport};
