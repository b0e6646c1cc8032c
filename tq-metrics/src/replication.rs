//! Independent replications of one router configuration
//!
//! Each seed drives a separate run. Loss is pooled over every offered packet
//! and reported with a Wilson interval; the per-run metrics are averaged with
//! a normal-approximation interval.

use serde::Serialize;
use tracing::{debug, info};
use turboq_core::{Router, RunOptions, SimulationRun};

use crate::error::MetricsError;
use crate::stats::{mean, sample_std_dev, wilson_interval, z_for_confidence};

pub const DEFAULT_CONFIDENCE: f64 = 0.95;

/// A pooled proportion with its confidence interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProportionEstimate {
    pub successes: u64,
    pub trials: u64,
    pub estimate: f64,
    pub low: f64,
    pub high: f64,
}

/// Mean of a per-replication metric with a symmetric interval.
///
/// With a single replication there is no spread to estimate, so `std_dev`
/// and `half_width` are zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MeanEstimate {
    pub mean: f64,
    pub std_dev: f64,
    pub half_width: f64,
}

impl MeanEstimate {
    fn from_samples(samples: &[f64], z: f64) -> Self {
        let m = mean(samples).unwrap_or(0.0);
        let std_dev = sample_std_dev(samples).unwrap_or(0.0);
        Self {
            mean: m,
            std_dev,
            half_width: z * std_dev / (samples.len() as f64).sqrt(),
        }
    }

    pub fn low(&self) -> f64 {
        self.mean - self.half_width
    }

    pub fn high(&self) -> f64 {
        self.mean + self.half_width
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplicationSummary {
    pub seeds: Vec<u64>,
    pub confidence: f64,
    pub loss_probability: ProportionEstimate,
    pub utilization: MeanEstimate,
    pub throughput: MeanEstimate,
    pub avg_waiting_time: MeanEstimate,
}

/// Run one replication per seed at the default 95% confidence level.
///
/// The seed in `options` is ignored; every other option is shared.
pub fn replicate(
    router: &Router,
    options: &RunOptions,
    seeds: &[u64],
) -> Result<ReplicationSummary, MetricsError> {
    replicate_with_confidence(router, options, seeds, DEFAULT_CONFIDENCE)
}

pub fn replicate_with_confidence(
    router: &Router,
    options: &RunOptions,
    seeds: &[u64],
    confidence: f64,
) -> Result<ReplicationSummary, MetricsError> {
    if seeds.is_empty() {
        return Err(MetricsError::InvalidInput(
            "at least one seed is required".to_string(),
        ));
    }
    let z = z_for_confidence(confidence).ok_or_else(|| {
        MetricsError::InvalidInput(format!("confidence must be in (0, 1), got {confidence}"))
    })?;

    info!(
        replications = seeds.len(),
        policy = router.policy().name(),
        confidence,
        "Starting replications"
    );

    let runs = seeds
        .iter()
        .map(|&seed| -> Result<SimulationRun, MetricsError> {
            let run = router.run(&options.with_seed(seed))?;
            debug!(
                seed,
                delivered = run.stats().packets_delivered,
                lost = run.stats().packets_lost,
                "Replication finished"
            );
            Ok(run)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let lost: u64 = runs.iter().map(|r| r.stats().packets_lost).sum();
    let offered: u64 = runs.iter().map(|r| r.stats().total_packets).sum();
    let (low, high) = wilson_interval(lost, offered, confidence).unwrap_or((0.0, 0.0));
    let loss_probability = ProportionEstimate {
        successes: lost,
        trials: offered,
        estimate: if offered > 0 {
            lost as f64 / offered as f64
        } else {
            0.0
        },
        low,
        high,
    };

    let metric = |f: fn(&SimulationRun) -> f64| {
        let samples: Vec<f64> = runs.iter().map(f).collect();
        MeanEstimate::from_samples(&samples, z)
    };

    let summary = ReplicationSummary {
        seeds: seeds.to_vec(),
        confidence,
        loss_probability,
        utilization: metric(|r| r.stats().utilization),
        throughput: metric(|r| r.stats().throughput),
        avg_waiting_time: metric(|r| r.stats().avg_waiting_time),
    };

    info!(
        loss = summary.loss_probability.estimate,
        loss_low = summary.loss_probability.low,
        loss_high = summary.loss_probability.high,
        "Replications complete"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use turboq_core::RouterConfig;

    fn router() -> Router {
        Router::new(RouterConfig::new(5.0, 3.0, 10)).unwrap()
    }

    #[test]
    fn empty_seed_list_is_rejected() {
        let result = replicate(&router(), &RunOptions::new(49.0, 200), &[]);
        assert!(matches!(result, Err(MetricsError::InvalidInput(_))));
    }

    #[test]
    fn invalid_confidence_is_rejected() {
        let result = replicate_with_confidence(&router(), &RunOptions::new(49.0, 200), &[1], 1.5);
        assert!(matches!(result, Err(MetricsError::InvalidInput(_))));
    }

    #[test]
    fn simulation_errors_propagate() {
        let result = replicate(&router(), &RunOptions::new(-1.0, 200), &[1]);
        assert!(matches!(result, Err(MetricsError::Simulation(_))));
    }

    #[test]
    fn single_replication_has_no_spread() {
        let summary = replicate(&router(), &RunOptions::new(49.0, 200), &[3]).unwrap();
        assert_eq!(summary.utilization.std_dev, 0.0);
        assert_eq!(summary.utilization.half_width, 0.0);
        assert_eq!(summary.utilization.low(), summary.utilization.high());
    }

    #[test]
    fn pooled_loss_matches_the_individual_runs() {
        let router = router();
        let options = RunOptions::new(49.0, 200);
        let seeds = [1, 2, 3, 4, 5];
        let summary = replicate(&router, &options, &seeds).unwrap();

        let mut lost = 0;
        let mut offered = 0;
        for &seed in &seeds {
            let stats = *router.run(&options.with_seed(seed)).unwrap().stats();
            lost += stats.packets_lost;
            offered += stats.total_packets;
        }
        assert_eq!(summary.loss_probability.successes, lost);
        assert_eq!(summary.loss_probability.trials, offered);

        let p = summary.loss_probability;
        assert!(p.low <= p.estimate && p.estimate <= p.high);
        assert!(summary.utilization.low() <= summary.utilization.mean);
        assert!(summary.throughput.half_width >= 0.0);
    }
}
