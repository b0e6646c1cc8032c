//! Router and run configuration

use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::SimTime;

/// Parameters of the M/M/1/K router.
///
/// `capacity` counts the packet in service plus the `capacity - 1` buffer slots.
///
/// # Example
/// ```
/// use turboq_core::RouterConfig;
///
/// let config = RouterConfig::new(5.0, 3.0, 10).validated().unwrap();
/// assert_eq!(config.buffer_slots(), 9);
/// assert!(RouterConfig::new(5.0, 0.0, 10).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Arrival rate λ (packets per second)
    pub arrival_rate: f64,
    /// Base service rate μ (packets per second)
    pub base_process_rate: f64,
    /// System capacity K
    pub capacity: usize,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            arrival_rate: 5.0,
            base_process_rate: 3.0,
            capacity: 10,
        }
    }
}

impl RouterConfig {
    pub fn new(arrival_rate: f64, base_process_rate: f64, capacity: usize) -> Self {
        Self {
            arrival_rate,
            base_process_rate,
            capacity,
        }
    }

    /// Parse a configuration from JSON and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, SimError> {
        let config: RouterConfig = serde_json::from_str(json)
            .map_err(|e| SimError::Configuration(format!("malformed router config: {e}")))?;
        config.validated()
    }

    /// Check every parameter; λ and μ must be finite and positive, K at least 1.
    pub fn validate(&self) -> Result<(), SimError> {
        if !(self.arrival_rate.is_finite() && self.arrival_rate > 0.0) {
            return Err(SimError::Configuration(format!(
                "arrival rate must be positive and finite, got {}",
                self.arrival_rate
            )));
        }
        if !(self.base_process_rate.is_finite() && self.base_process_rate > 0.0) {
            return Err(SimError::Configuration(format!(
                "base process rate must be positive and finite, got {}",
                self.base_process_rate
            )));
        }
        if self.capacity < 1 {
            return Err(SimError::Configuration(
                "capacity must be at least 1 (the packet in service)".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validated(self) -> Result<Self, SimError> {
        self.validate()?;
        Ok(self)
    }

    /// Number of packets that can wait behind the one in service.
    pub fn buffer_slots(&self) -> usize {
        self.capacity.saturating_sub(1)
    }
}

/// Per-run options: horizon, number of generated packets and the RNG seed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunOptions {
    /// Simulated time limit in seconds.
    ///
    /// Time is kept in `u64` nanoseconds, so horizons must stay below
    /// `u64::MAX / 1e9` seconds (about 1.8e10 s, 584 years).
    pub horizon: f64,
    /// Number of arrivals generated up front
    pub packet_count: usize,
    /// Seed for the random stream; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            horizon: 1000.0,
            packet_count: 100,
            seed: None,
        }
    }
}

impl RunOptions {
    pub fn new(horizon: f64, packet_count: usize) -> Self {
        Self {
            horizon,
            packet_count,
            seed: None,
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The horizon as a [`SimTime`]; negative or non-finite horizons are rejected.
    pub fn horizon_time(&self) -> Result<SimTime, SimError> {
        SimTime::try_from_secs_f64(self.horizon).map_err(|_| {
            SimError::Configuration(format!(
                "horizon must be a finite, non-negative number of seconds, got {}",
                self.horizon
            ))
        })
    }
}
