//! Simulation time management

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use std::time::Duration;

use crate::error::SimError;

const NANOS_PER_SEC: f64 = 1_000_000_000.0;

/// Simulation time with nanosecond precision
///
/// SimTime represents a point in simulated time, stored as nanoseconds since
/// the start of a run. Rates in this crate are expressed per simulated
/// second, so the real-valued view of a timestamp is [`SimTime::as_secs_f64`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SimTime(u64);

impl SimTime {
    /// The start of every run
    pub const fn zero() -> Self {
        SimTime(0)
    }

    /// Create a SimTime from nanoseconds
    pub const fn from_nanos(nanos: u64) -> Self {
        SimTime(nanos)
    }

    /// Create a SimTime from milliseconds
    pub const fn from_millis(millis: u64) -> Self {
        SimTime(millis * 1_000_000)
    }

    /// Create a SimTime from seconds
    pub const fn from_secs(secs: u64) -> Self {
        SimTime(secs * 1_000_000_000)
    }

    /// Convert real seconds into a SimTime.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidTime`] if `secs` is negative, NaN, infinite,
    /// or too large to be represented in nanoseconds.
    ///
    /// # Examples
    /// ```
    /// # use turboq_core::SimTime;
    /// let time = SimTime::try_from_secs_f64(1.5).unwrap();
    /// assert_eq!(time.as_nanos(), 1_500_000_000);
    /// assert!(SimTime::try_from_secs_f64(-1.0).is_err());
    /// ```
    pub fn try_from_secs_f64(secs: f64) -> Result<Self, SimError> {
        const MAX_SECS: f64 = (u64::MAX as f64) / NANOS_PER_SEC;
        if !secs.is_finite() || secs < 0.0 || secs >= MAX_SECS {
            return Err(SimError::InvalidTime(secs));
        }
        Ok(SimTime((secs * NANOS_PER_SEC) as u64))
    }

    /// Get the raw nanosecond value
    pub const fn as_nanos(&self) -> u64 {
        self.0
    }

    /// Real-valued seconds since the start of the run
    pub fn as_secs_f64(&self) -> f64 {
        self.0 as f64 / NANOS_PER_SEC
    }

    /// Calculate the duration since another SimTime (zero if `earlier` is later)
    pub fn duration_since(&self, earlier: SimTime) -> Duration {
        Duration::from_nanos(self.0.saturating_sub(earlier.0))
    }

    /// Add a duration, or `None` past the last representable instant (about 584 years)
    pub fn checked_add(&self, duration: Duration) -> Option<Self> {
        let nanos = u64::try_from(duration.as_nanos()).ok()?;
        self.0.checked_add(nanos).map(SimTime)
    }

    /// Add a duration to this SimTime, saturating at the last representable instant
    pub fn add_duration(&self, duration: Duration) -> Self {
        let nanos = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);
        SimTime(self.0.saturating_add(nanos))
    }
}

impl Add<Duration> for SimTime {
    type Output = SimTime;

    fn add(self, rhs: Duration) -> Self::Output {
        self.add_duration(rhs)
    }
}

impl Sub<SimTime> for SimTime {
    type Output = Duration;

    fn sub(self, rhs: SimTime) -> Self::Output {
        self.duration_since(rhs)
    }
}

impl Default for SimTime {
    fn default() -> Self {
        SimTime::zero()
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}s", self.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simtime_creation() {
        assert_eq!(SimTime::zero().as_nanos(), 0);
        assert_eq!(SimTime::from_nanos(1000).as_nanos(), 1000);
        assert_eq!(SimTime::from_millis(1).as_nanos(), 1_000_000);
        assert_eq!(SimTime::from_secs(1).as_nanos(), 1_000_000_000);
    }

    #[test]
    fn test_simtime_arithmetic() {
        let t1 = SimTime::from_millis(100);
        let t2 = SimTime::from_millis(50);

        assert_eq!(t1 + Duration::from_millis(25), SimTime::from_millis(125));
        assert_eq!(t1 - t2, Duration::from_millis(50));
        assert_eq!(t2 - t1, Duration::ZERO);
    }

    #[test]
    fn test_simtime_from_secs_f64() {
        assert_eq!(SimTime::try_from_secs_f64(0.0).unwrap(), SimTime::zero());
        assert_eq!(SimTime::try_from_secs_f64(0.5).unwrap().as_nanos(), 500_000_000);
        assert_eq!(SimTime::try_from_secs_f64(49.0).unwrap(), SimTime::from_secs(49));
        assert!((SimTime::from_millis(1500).as_secs_f64() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_simtime_rejects_unrepresentable_values() {
        assert!(matches!(SimTime::try_from_secs_f64(-1.0), Err(SimError::InvalidTime(_))));
        assert!(SimTime::try_from_secs_f64(f64::NAN).is_err());
        assert!(SimTime::try_from_secs_f64(f64::INFINITY).is_err());
        assert!(SimTime::try_from_secs_f64(1e12).is_err());
    }

    #[test]
    fn test_simtime_checked_add_detects_overflow() {
        let t = SimTime::from_secs(1);
        assert_eq!(t.checked_add(Duration::from_secs(2)), Some(SimTime::from_secs(3)));
        assert_eq!(SimTime::from_nanos(u64::MAX).checked_add(Duration::from_nanos(1)), None);
        assert_eq!(t.checked_add(Duration::from_secs(u64::MAX)), None);
    }

    #[test]
    fn test_simtime_display() {
        assert_eq!(SimTime::from_millis(1500).to_string(), "1.500000s");
    }
}
