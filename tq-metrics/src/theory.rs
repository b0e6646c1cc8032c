//! Closed-form M/M/1/K results
//!
//! These describe a router that always serves at its base rate. Against the
//! threshold policy they are a baseline: the turbo rate should only push the
//! simulated loss below it.

use serde::Serialize;
use turboq_core::{RouterConfig, SimulationRun, SimulationStats};

/// `ρ` values closer than this to 1 use the `ρ = 1` limit.
const UNIT_LOAD_TOLERANCE: f64 = 1e-9;

/// Offered load `ρ = λ / μ`.
pub fn traffic_intensity(arrival_rate: f64, service_rate: f64) -> f64 {
    arrival_rate / service_rate
}

/// Blocking probability of an M/M/1/K queue.
///
/// `ρ^K (1 - ρ) / (1 - ρ^(K+1))`, or `1 / (K + 1)` when `ρ = 1`.
///
/// # Example
/// ```
/// use turboq_metrics::theory::mm1k_loss_probability;
///
/// assert!((mm1k_loss_probability(1.0, 1.0, 4) - 0.2).abs() < 1e-12);
/// ```
pub fn mm1k_loss_probability(arrival_rate: f64, service_rate: f64, capacity: usize) -> f64 {
    let rho = traffic_intensity(arrival_rate, service_rate);
    let k = capacity as i32;
    if (rho - 1.0).abs() < UNIT_LOAD_TOLERANCE {
        1.0 / (capacity as f64 + 1.0)
    } else if rho > 1.0 {
        // Same ratio divided through by ρ^(K+1), so no power of ρ overflows
        let r = rho.recip();
        (rho - 1.0) / (rho - r.powi(k))
    } else {
        rho.powi(k) * (1.0 - rho) / (1.0 - rho.powi(k + 1))
    }
}

/// Stationary probabilities `p_0 ..= p_K` of the number in system.
pub fn mm1k_state_probabilities(arrival_rate: f64, service_rate: f64, capacity: usize) -> Vec<f64> {
    let rho = traffic_intensity(arrival_rate, service_rate);
    let k = capacity as i32;
    // Weights are scaled by the largest one (ρ^K when ρ > 1) to stay finite
    let weights: Vec<f64> = if rho > 1.0 {
        let r = rho.recip();
        (0..=k).map(|n| r.powi(k - n)).collect()
    } else {
        (0..=k).map(|n| rho.powi(n)).collect()
    };
    let total: f64 = weights.iter().sum();
    weights.into_iter().map(|w| w / total).collect()
}

/// Simulated loss next to the M/M/1/K prediction for the base rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TheoreticalComparison {
    pub traffic_intensity: f64,
    pub theoretical_loss_probability: f64,
    pub simulated_loss_probability: f64,
    pub absolute_error: f64,
}

impl TheoreticalComparison {
    pub fn new(config: &RouterConfig, stats: &SimulationStats) -> Self {
        Self::at_rate(config, config.base_process_rate, stats)
    }

    /// Compare against the base rate of the policy that drove `run`, which
    /// differs from the configured one under a custom fixed rate.
    pub fn for_run(run: &SimulationRun) -> Self {
        Self::at_rate(run.config(), run.base_rate(), run.stats())
    }

    fn at_rate(config: &RouterConfig, service_rate: f64, stats: &SimulationStats) -> Self {
        let theoretical =
            mm1k_loss_probability(config.arrival_rate, service_rate, config.capacity);
        Self {
            traffic_intensity: traffic_intensity(config.arrival_rate, service_rate),
            theoretical_loss_probability: theoretical,
            simulated_loss_probability: stats.drop_probability,
            absolute_error: (stats.drop_probability - theoretical).abs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_load_uses_uniform_limit() {
        assert!((mm1k_loss_probability(3.0, 3.0, 9) - 0.1).abs() < 1e-12);
        let probs = mm1k_state_probabilities(2.0, 2.0, 3);
        assert!(probs.iter().all(|p| (p - 0.25).abs() < 1e-12));
    }

    #[test]
    fn reference_scenario_loss() {
        // λ = 5, μ = 3, K = 10
        let rho: f64 = 5.0 / 3.0;
        let expected = rho.powi(10) * (1.0 - rho) / (1.0 - rho.powi(11));
        let loss = mm1k_loss_probability(5.0, 3.0, 10);
        assert!((loss - expected).abs() < 1e-12);
        assert!((loss - 0.4015).abs() < 1e-3, "{loss}");
    }

    #[test]
    fn capacity_one_is_erlang_loss() {
        // K = 1: P_loss = ρ / (1 + ρ)
        let loss = mm1k_loss_probability(2.0, 4.0, 1);
        assert!((loss - 0.5 / 1.5).abs() < 1e-12);
    }

    #[test]
    fn state_probabilities_sum_to_one_and_end_in_loss() {
        let probs = mm1k_state_probabilities(5.0, 3.0, 10);
        assert_eq!(probs.len(), 11);
        assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        // PASTA: an arrival is lost with the probability of finding the system full
        assert!((probs[10] - mm1k_loss_probability(5.0, 3.0, 10)).abs() < 1e-12);
    }

    #[test]
    fn overloaded_large_buffer_stays_finite() {
        // ρ = 5/3, K = 2000: loss tends to 1 - 1/ρ = 0.4
        let loss = mm1k_loss_probability(5.0, 3.0, 2000);
        assert!((loss - 0.4).abs() < 1e-12, "{loss}");

        let probs = mm1k_state_probabilities(5.0, 3.0, 2000);
        assert!(probs.iter().all(|p| p.is_finite() && *p >= 0.0));
        assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert!((probs[2000] - loss).abs() < 1e-12);
    }

    #[test]
    fn underloaded_large_buffer_stays_finite() {
        // ρ = 3/5, K = 2000: p_0 tends to 1 - ρ and loss to 0
        let loss = mm1k_loss_probability(3.0, 5.0, 2000);
        assert!(loss.is_finite() && (0.0..1e-12).contains(&loss), "{loss}");

        let probs = mm1k_state_probabilities(3.0, 5.0, 2000);
        assert!(probs.iter().all(|p| p.is_finite()));
        assert!((probs[0] - 0.4).abs() < 1e-12);
        assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn comparison_for_large_capacity_run_is_finite() {
        let config = RouterConfig::new(5.0, 3.0, 2000);
        let run = turboq_core::Router::new(config)
            .unwrap()
            .simulate(49.0, 200, Some(1))
            .unwrap();
        let comparison = TheoreticalComparison::new(&config, run.stats());

        assert!((comparison.theoretical_loss_probability - 0.4).abs() < 1e-12);
        assert!(comparison.absolute_error.is_finite());
    }

    #[test]
    fn light_load_rarely_loses() {
        assert!(mm1k_loss_probability(1.0, 10.0, 10) < 1e-9);
    }
}
