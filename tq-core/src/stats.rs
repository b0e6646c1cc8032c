//! Run counters and the derived statistics record

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::types::{OccupancySample, RateSample};

/// Counters accumulated during one run. Every field only grows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Counters {
    pub packets_delivered: u64,
    pub packets_lost: u64,
    /// Sum over delivered packets of the time spent in the buffer
    pub cumulative_waiting_time: Duration,
    /// Sum of every service duration drawn, including services that end past the horizon
    pub cumulative_busy_time: Duration,
}

/// Aggregate metrics of a finished run.
///
/// Computed once from the final counters and histories; degenerate runs give
/// zeros instead of NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationStats {
    pub packets_delivered: u64,
    pub packets_lost: u64,
    pub total_packets: u64,
    pub drop_probability: f64,
    /// Seconds covered by the occupancy history
    pub simulation_duration: f64,
    pub utilization: f64,
    /// Delivered packets per second
    pub throughput: f64,
    /// Mean buffer wait of delivered packets, in seconds
    pub avg_waiting_time: f64,
    pub rate_mean: f64,
    /// Population standard deviation of the rate history
    pub rate_std_dev: f64,
}

impl SimulationStats {
    pub fn from_run(counters: &Counters, occupancy: &[OccupancySample], rates: &[RateSample]) -> Self {
        let delivered = counters.packets_delivered;
        let lost = counters.packets_lost;
        let total_packets = delivered + lost;

        let simulation_duration = occupancy.last().map_or(0.0, |s| s.time.as_secs_f64());
        let per_second = |value: f64| {
            if simulation_duration > 0.0 {
                value / simulation_duration
            } else {
                0.0
            }
        };

        let drop_probability = if total_packets > 0 {
            lost as f64 / total_packets as f64
        } else {
            0.0
        };
        let avg_waiting_time = if delivered > 0 {
            counters.cumulative_waiting_time.as_secs_f64() / delivered as f64
        } else {
            0.0
        };
        let (rate_mean, rate_std_dev) = mean_and_population_std_dev(rates.iter().map(|s| s.rate));

        Self {
            packets_delivered: delivered,
            packets_lost: lost,
            total_packets,
            drop_probability,
            simulation_duration,
            utilization: per_second(counters.cumulative_busy_time.as_secs_f64()),
            throughput: per_second(delivered as f64),
            avg_waiting_time,
            rate_mean,
            rate_std_dev,
        }
    }
}

fn mean_and_population_std_dev(values: impl Iterator<Item = f64> + Clone) -> (f64, f64) {
    let n = values.clone().count();
    if n == 0 {
        return (0.0, 0.0);
    }
    let mean = values.clone().sum::<f64>() / n as f64;
    let variance = values.map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;
    (mean, variance.sqrt())
}
