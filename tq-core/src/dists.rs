//! Random process generation for arrivals and service times
//!
//! Both the Poisson arrival stream and the exponential service times are drawn
//! from a single seeded generator. Arrivals are drawn up front, service times on
//! demand in processing order, so a fixed seed reproduces a run exactly.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Exp;
use std::time::Duration;

use crate::error::SimError;
use crate::SimTime;

/// Smallest sample the clock can represent. Exponential draws are floored to
/// it so service times stay positive and arrival times strictly increase.
const MIN_SAMPLE: Duration = Duration::from_nanos(1);

/// Seedable source of arrival timestamps and service durations
#[derive(Debug, Clone)]
pub struct ProcessGenerator {
    rng: StdRng,
}

impl ProcessGenerator {
    /// Create a generator; `None` seeds from OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// Draw `packet_count` arrival timestamps of a Poisson process with rate `arrival_rate`.
    ///
    /// Inter-arrival gaps are i.i.d. `Exp(arrival_rate)`; the returned
    /// timestamps are their running sum and therefore strictly increasing.
    ///
    /// # Errors
    ///
    /// [`SimError::Configuration`] for an invalid rate, [`SimError::InvalidTime`]
    /// if the running sum passes the last instant [`SimTime`] can represent.
    ///
    /// # Example
    /// ```
    /// use turboq_core::ProcessGenerator;
    ///
    /// let mut generator = ProcessGenerator::new(Some(42));
    /// let arrivals = generator.generate_arrivals(5.0, 100).unwrap();
    /// assert_eq!(arrivals.len(), 100);
    /// assert!(arrivals.windows(2).all(|w| w[0] < w[1]));
    /// ```
    pub fn generate_arrivals(
        &mut self,
        arrival_rate: f64,
        packet_count: usize,
    ) -> Result<Vec<SimTime>, SimError> {
        let exp = exponential(arrival_rate, "arrival rate")?;

        let mut arrivals = Vec::with_capacity(packet_count);
        let mut now = SimTime::zero();
        for _ in 0..packet_count {
            let gap = self.sample(&exp)?;
            now = now
                .checked_add(gap)
                .ok_or_else(|| SimError::InvalidTime(now.as_secs_f64() + gap.as_secs_f64()))?;
            arrivals.push(now);
        }
        Ok(arrivals)
    }

    /// Draw a single `Exp(rate)` service duration.
    pub fn draw_service_duration(&mut self, rate: f64) -> Result<Duration, SimError> {
        let exp = exponential(rate, "service rate")?;
        self.sample(&exp)
    }

    fn sample(&mut self, exp: &Exp<f64>) -> Result<Duration, SimError> {
        let seconds: f64 = self.rng.sample(exp);
        let duration = Duration::try_from_secs_f64(seconds).map_err(|_| SimError::InvalidTime(seconds))?;
        Ok(duration.max(MIN_SAMPLE))
    }
}

fn exponential(rate: f64, what: &str) -> Result<Exp<f64>, SimError> {
    if !(rate.is_finite() && rate > 0.0) {
        return Err(SimError::Configuration(format!(
            "{what} must be positive and finite, got {rate}"
        )));
    }
    Exp::new(rate).map_err(|e| SimError::Configuration(format!("{what} {rate}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrivals_are_strictly_increasing() {
        let mut generator = ProcessGenerator::new(Some(7));
        let arrivals = generator.generate_arrivals(10.0, 500).unwrap();

        assert_eq!(arrivals.len(), 500);
        assert!(arrivals[0] > SimTime::zero());
        assert!(arrivals.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_zero_packets_yields_no_arrivals() {
        let mut generator = ProcessGenerator::new(Some(7));
        assert!(generator.generate_arrivals(10.0, 0).unwrap().is_empty());
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = ProcessGenerator::new(Some(1234));
        let mut b = ProcessGenerator::new(Some(1234));

        assert_eq!(
            a.generate_arrivals(5.0, 50).unwrap(),
            b.generate_arrivals(5.0, 50).unwrap()
        );
        for _ in 0..20 {
            assert_eq!(
                a.draw_service_duration(3.0).unwrap(),
                b.draw_service_duration(3.0).unwrap()
            );
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let mut a = ProcessGenerator::new(Some(1));
        let mut b = ProcessGenerator::new(Some(2));
        assert_ne!(
            a.generate_arrivals(5.0, 20).unwrap(),
            b.generate_arrivals(5.0, 20).unwrap()
        );
    }

    #[test]
    fn test_service_durations_are_positive() {
        let mut generator = ProcessGenerator::new(Some(99));
        for _ in 0..1000 {
            assert!(generator.draw_service_duration(1000.0).unwrap() > Duration::ZERO);
        }
    }

    #[test]
    fn test_sample_mean_tracks_rate() {
        let mut generator = ProcessGenerator::new(Some(2024));
        let n = 20_000;
        let total: f64 = (0..n)
            .map(|_| generator.draw_service_duration(4.0).unwrap().as_secs_f64())
            .sum();
        let mean = total / n as f64;
        // Mean of Exp(4) is 0.25; std-err of the mean is 0.25/sqrt(n) ~ 0.0018
        assert!((mean - 0.25).abs() < 0.02, "mean service time {mean}");
    }

    #[test]
    fn test_arrivals_beyond_the_clock_range_are_rejected() {
        // Mean gap of 1e15 s against a clock range of ~1.8e10 s
        let mut generator = ProcessGenerator::new(Some(3));
        assert!(matches!(
            generator.generate_arrivals(1e-15, 10),
            Err(SimError::InvalidTime(_))
        ));
    }

    #[test]
    fn test_invalid_rates_are_configuration_errors() {
        let mut generator = ProcessGenerator::new(Some(0));
        assert!(matches!(
            generator.generate_arrivals(0.0, 10),
            Err(SimError::Configuration(_))
        ));
        assert!(matches!(
            generator.draw_service_duration(-2.0),
            Err(SimError::Configuration(_))
        ));
        assert!(generator.draw_service_duration(f64::NAN).is_err());
    }
}
