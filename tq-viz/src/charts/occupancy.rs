//! Packets in system over time, with the service rate underneath

use crate::charts::util::{axis_max, occupancy_steps, rate_steps};
use crate::charts::ChartConfig;
use crate::error::VizError;
use plotters::prelude::*;
use std::path::Path;
use turboq_core::SimulationRun;

/// Create the occupancy chart with the default configuration
///
/// # Example
/// ```no_run
/// use turboq_core::{Router, RouterConfig};
/// use turboq_viz::charts::occupancy::create_occupancy_chart;
///
/// let run = Router::new(RouterConfig::default())?.simulate(49.0, 200, Some(42))?;
/// create_occupancy_chart(&run, "occupancy.svg")?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn create_occupancy_chart(
    run: &SimulationRun,
    output_path: impl AsRef<Path>,
) -> Result<(), VizError> {
    let config = ChartConfig::new("Packets in System")
        .x_label("Time (s)")
        .y_label("Packets");

    create_occupancy_chart_with_config(run, output_path, config)
}

/// Two stacked panels: the post-step occupancy history on top and the rate in
/// force for each event below
pub fn create_occupancy_chart_with_config(
    run: &SimulationRun,
    output_path: impl AsRef<Path>,
    config: ChartConfig,
) -> Result<(), VizError> {
    let occupancy = run.occupancy();
    if occupancy.len() < 2 {
        return Err(VizError::InvalidConfiguration(
            "No events processed, nothing to plot".to_string(),
        ));
    }

    let occupancy_points = occupancy_steps(occupancy);
    let rate_points = rate_steps(occupancy, run.rates());

    let end_time = occupancy_points
        .last()
        .map(|(t, _)| *t)
        .filter(|t| *t > 0.0)
        .unwrap_or(1.0);
    let max_packets = axis_max(run.config().capacity as f64);
    let max_rate = axis_max(rate_points.iter().map(|(_, r)| *r).fold(0.0f64, f64::max));

    let output_path = output_path.as_ref();
    let root = SVGBackend::new(output_path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| VizError::RenderingError(format!("Failed to fill background: {e}")))?;

    let (upper, lower) = root.split_vertically(config.height * 2 / 3);

    let mut chart = ChartBuilder::on(&upper)
        .caption(&config.title, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..end_time, 0.0..max_packets)
        .map_err(|e| VizError::RenderingError(format!("Failed to build chart: {e}")))?;

    chart
        .configure_mesh()
        .x_desc(&config.x_label)
        .y_desc(&config.y_label)
        .axis_desc_style(("sans-serif", 15))
        .draw()
        .map_err(|e| VizError::RenderingError(format!("Failed to configure mesh: {e}")))?;

    chart
        .draw_series(LineSeries::new(occupancy_points, &BLUE))
        .map_err(|e| VizError::RenderingError(format!("Failed to draw occupancy: {e}")))?;

    let mut rate_chart = ChartBuilder::on(&lower)
        .caption("Service Rate", ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..end_time, 0.0..max_rate)
        .map_err(|e| VizError::RenderingError(format!("Failed to build chart: {e}")))?;

    rate_chart
        .configure_mesh()
        .x_desc(&config.x_label)
        .y_desc("Rate (packets/s)")
        .axis_desc_style(("sans-serif", 15))
        .draw()
        .map_err(|e| VizError::RenderingError(format!("Failed to configure mesh: {e}")))?;

    rate_chart
        .draw_series(LineSeries::new(rate_points, &RED))
        .map_err(|e| VizError::RenderingError(format!("Failed to draw rates: {e}")))?;

    root.present()
        .map_err(|e| VizError::ExportFailed(format!("Failed to save chart: {e}")))?;

    tracing::debug!(path = %output_path.display(), "Occupancy chart written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use turboq_core::{Router, RouterConfig};

    #[test]
    fn test_occupancy_chart_generation() {
        let run = Router::new(RouterConfig::default())
            .unwrap()
            .simulate(49.0, 200, Some(42))
            .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let output_path = dir.path().join("occupancy.svg");

        create_occupancy_chart(&run, &output_path).unwrap();

        let svg = std::fs::read_to_string(&output_path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Packets in System"));
    }

    #[test]
    fn configured_dimensions_size_the_canvas() {
        let run = Router::new(RouterConfig::default())
            .unwrap()
            .simulate(49.0, 200, Some(42))
            .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let output_path = dir.path().join("wide.svg");
        let config = ChartConfig::new("Wide Occupancy").dimensions(1600, 900);

        create_occupancy_chart_with_config(&run, &output_path, config).unwrap();

        let svg = std::fs::read_to_string(&output_path).unwrap();
        assert!(svg.contains(r#"width="1600""#));
        assert!(svg.contains(r#"height="900""#));
        assert!(svg.contains("Wide Occupancy"));
    }

    #[test]
    fn run_without_events_is_rejected() {
        let run = Router::new(RouterConfig::default())
            .unwrap()
            .simulate(0.0, 200, Some(42))
            .unwrap();
        let dir = tempfile::tempdir().unwrap();

        let result = create_occupancy_chart(&run, dir.path().join("empty.svg"));
        assert!(matches!(result, Err(VizError::InvalidConfiguration(_))));
    }
}
