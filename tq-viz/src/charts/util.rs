use turboq_core::{OccupancySample, RateSample};

/// Post-step polyline of the occupancy history: each state holds until the next sample.
pub fn occupancy_steps(history: &[OccupancySample]) -> Vec<(f64, f64)> {
    let mut points = Vec::with_capacity(history.len() * 2);
    for (i, sample) in history.iter().enumerate() {
        let t = sample.time.as_secs_f64();
        if i > 0 {
            points.push((t, history[i - 1].packets as f64));
        }
        points.push((t, sample.packets as f64));
    }
    points
}

/// Rate in force for each event, drawn from the previous event up to the event itself.
pub fn rate_steps(history: &[OccupancySample], rates: &[RateSample]) -> Vec<(f64, f64)> {
    history
        .iter()
        .zip(rates)
        .flat_map(|(before, rate)| {
            [
                (before.time.as_secs_f64(), rate.rate),
                (rate.time.as_secs_f64(), rate.rate),
            ]
        })
        .collect()
}

/// Upper bound for an axis starting at zero, with headroom and a non-empty range.
pub fn axis_max(max: f64) -> f64 {
    if max > 0.0 {
        max * 1.1
    } else {
        1.0
    }
}
