//! Bar chart of the time-weighted state probabilities

use crate::charts::util::axis_max;
use crate::charts::ChartConfig;
use crate::error::VizError;
use plotters::prelude::*;
use std::path::Path;
use turboq_metrics::StateDistribution;

const BAR_HALF_WIDTH: f64 = 0.4;

pub fn create_state_distribution_chart(
    distribution: &StateDistribution,
    output_path: impl AsRef<Path>,
) -> Result<(), VizError> {
    let config = ChartConfig::new("System State Distribution")
        .x_label("Packets in System")
        .y_label("Probability");

    create_state_distribution_chart_with_config(distribution, output_path, config)
}

pub fn create_state_distribution_chart_with_config(
    distribution: &StateDistribution,
    output_path: impl AsRef<Path>,
    config: ChartConfig,
) -> Result<(), VizError> {
    if distribution.total_time <= 0.0 {
        return Err(VizError::InvalidConfiguration(
            "State distribution covers no time, nothing to plot".to_string(),
        ));
    }

    let probabilities = &distribution.probabilities;
    let states = probabilities.len();
    let max_probability = axis_max(probabilities.iter().copied().fold(0.0f64, f64::max));

    let output_path = output_path.as_ref();
    let root = SVGBackend::new(output_path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| VizError::RenderingError(format!("Failed to fill background: {e}")))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5..(states as f64 - 0.5), 0.0..max_probability)
        .map_err(|e| VizError::RenderingError(format!("Failed to build chart: {e}")))?;

    chart
        .configure_mesh()
        .x_desc(&config.x_label)
        .y_desc(&config.y_label)
        .x_labels(states)
        .x_label_formatter(&|x: &f64| format!("{x:.0}"))
        .axis_desc_style(("sans-serif", 15))
        .draw()
        .map_err(|e| VizError::RenderingError(format!("Failed to configure mesh: {e}")))?;

    let bar = |n: usize, p: f64| {
        let x = n as f64;
        [(x - BAR_HALF_WIDTH, 0.0), (x + BAR_HALF_WIDTH, p)]
    };

    chart
        .draw_series(
            probabilities
                .iter()
                .enumerate()
                .map(|(n, &p)| Rectangle::new(bar(n, p), BLUE.mix(0.75).filled())),
        )
        .map_err(|e| VizError::RenderingError(format!("Failed to draw bar: {e}")))?;
    chart
        .draw_series(
            probabilities
                .iter()
                .enumerate()
                .map(|(n, &p)| Rectangle::new(bar(n, p), BLACK.stroke_width(1))),
        )
        .map_err(|e| VizError::RenderingError(format!("Failed to draw bar outline: {e}")))?;

    root.present()
        .map_err(|e| VizError::ExportFailed(format!("Failed to save chart: {e}")))?;

    tracing::debug!(path = %output_path.display(), states, "State distribution chart written");
    Ok(())
}
