//! SVG charts of a finished run
//!
//! Charts use the plotters SVG backend, so no system fonts are needed.

pub mod occupancy;
pub mod state_distribution;
mod util;

use crate::error::VizError;
use std::path::Path;
use turboq_core::SimulationRun;
use turboq_metrics::StateDistribution;

/// Common chart configuration
#[derive(Debug, Clone)]
pub struct ChartConfig {
    /// Chart width in pixels
    pub width: u32,
    /// Chart height in pixels
    pub height: u32,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: String::new(),
            x_label: String::new(),
            y_label: String::new(),
        }
    }
}

impl ChartConfig {
    /// Create a new chart configuration with title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Set the chart dimensions
    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = label.into();
        self
    }

    pub fn y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = label.into();
        self
    }
}

/// Write `occupancy.svg` and `state_distribution.svg` into `output_dir`
///
/// # Example
/// ```no_run
/// use turboq_core::{Router, RouterConfig};
/// use turboq_viz::charts::generate_all_charts;
///
/// let run = Router::new(RouterConfig::default())?.simulate(49.0, 200, Some(42))?;
/// generate_all_charts(&run, "output/charts")?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn generate_all_charts(
    run: &SimulationRun,
    output_dir: impl AsRef<Path>,
) -> Result<(), VizError> {
    let output_dir = output_dir.as_ref();
    std::fs::create_dir_all(output_dir)?;

    occupancy::create_occupancy_chart(run, output_dir.join("occupancy.svg"))?;

    let distribution = StateDistribution::from_history(run.occupancy());
    state_distribution::create_state_distribution_chart(
        &distribution,
        output_dir.join("state_distribution.svg"),
    )?;

    tracing::info!(dir = %output_dir.display(), "Charts written");
    Ok(())
}
