//! Time-weighted distribution of the number of packets in the router

use serde::Serialize;
use turboq_core::OccupancySample;

/// Fraction of the run spent with each number of packets in system.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateDistribution {
    /// Seconds spent in state `n`, indexed by `n`
    pub time_in_state: Vec<f64>,
    /// `time_in_state[n]` divided by the run length (all zero for an empty run)
    pub probabilities: Vec<f64>,
    /// Run length in seconds, the timestamp of the last sample
    pub total_time: f64,
}

impl StateDistribution {
    /// Build the distribution from an occupancy history.
    ///
    /// The state at sample `i` lasts until sample `i + 1`; the final sample
    /// marks the end of the run and contributes no time of its own.
    ///
    /// # Example
    /// ```
    /// use turboq_core::{OccupancySample, SimTime};
    /// use turboq_metrics::StateDistribution;
    ///
    /// let history = [
    ///     OccupancySample { time: SimTime::from_secs(0), packets: 0 },
    ///     OccupancySample { time: SimTime::from_secs(1), packets: 1 },
    ///     OccupancySample { time: SimTime::from_secs(4), packets: 0 },
    /// ];
    /// let dist = StateDistribution::from_history(&history);
    /// assert_eq!(dist.probabilities, vec![0.25, 0.75]);
    /// ```
    pub fn from_history(history: &[OccupancySample]) -> Self {
        let states = history.iter().map(|s| s.packets).max().map_or(0, |m| m + 1);
        let mut time_in_state = vec![0.0; states];

        for pair in history.windows(2) {
            let duration = (pair[1].time - pair[0].time).as_secs_f64();
            time_in_state[pair[0].packets] += duration;
        }

        let total_time = history.last().map_or(0.0, |s| s.time.as_secs_f64());
        let probabilities = time_in_state
            .iter()
            .map(|&t| if total_time > 0.0 { t / total_time } else { 0.0 })
            .collect();

        Self {
            time_in_state,
            probabilities,
            total_time,
        }
    }

    /// Time-averaged number of packets in system, `Σ n · p_n`.
    pub fn mean_packets(&self) -> f64 {
        self.probabilities
            .iter()
            .enumerate()
            .map(|(n, p)| n as f64 * p)
            .sum()
    }

    /// Fraction of the run with the server busy, `1 - p_0`.
    pub fn busy_fraction(&self) -> f64 {
        if self.total_time > 0.0 {
            1.0 - self.probabilities.first().copied().unwrap_or(0.0)
        } else {
            0.0
        }
    }
}
