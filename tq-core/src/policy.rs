//! Service-rate control policies
//!
//! The router consults its policy once per processed event, before the event
//! is applied, so the decision always reflects the buffer as the previous
//! event left it.

use std::fmt;

/// Threshold rule: `turbo_rate` iff the buffer holds more than `capacity / 2`
/// packets (real division), `base_rate` otherwise.
///
/// # Example
/// ```
/// use turboq_core::select_rate;
///
/// // K = 10: the threshold is 5, so 6 queued packets switch to turbo.
/// assert_eq!(select_rate(5, 10, 3.0, 6.0), 3.0);
/// assert_eq!(select_rate(6, 10, 3.0, 6.0), 6.0);
/// ```
pub fn select_rate(buffer_len: usize, capacity: usize, base_rate: f64, turbo_rate: f64) -> f64 {
    if buffer_len as f64 > capacity as f64 / 2.0 {
        turbo_rate
    } else {
        base_rate
    }
}

/// Trait for rate controllers consulted by the router
pub trait RatePolicy: Send + Sync + fmt::Debug {
    /// Service rate to use given the current buffer length and system capacity.
    fn select_rate(&self, buffer_len: usize, capacity: usize) -> f64;

    /// The rate used while the buffer is lightly loaded.
    fn base_rate(&self) -> f64;

    /// Short label for logs and reports.
    fn name(&self) -> &'static str;
}

/// Two-level threshold policy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdPolicy {
    base_rate: f64,
    turbo_rate: f64,
}

impl ThresholdPolicy {
    /// Policy whose turbo rate is twice the base rate.
    pub fn new(base_rate: f64) -> Self {
        Self {
            base_rate,
            turbo_rate: 2.0 * base_rate,
        }
    }

    pub fn turbo_rate(&self) -> f64 {
        self.turbo_rate
    }
}

impl RatePolicy for ThresholdPolicy {
    fn select_rate(&self, buffer_len: usize, capacity: usize) -> f64 {
        select_rate(buffer_len, capacity, self.base_rate, self.turbo_rate)
    }

    fn base_rate(&self) -> f64 {
        self.base_rate
    }

    fn name(&self) -> &'static str {
        "threshold"
    }
}

/// Always serve at the base rate: a plain M/M/1/K router.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedRatePolicy {
    rate: f64,
}

impl FixedRatePolicy {
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }
}

impl RatePolicy for FixedRatePolicy {
    fn select_rate(&self, _buffer_len: usize, _capacity: usize) -> f64 {
        self.rate
    }

    fn base_rate(&self) -> f64 {
        self.rate
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}
