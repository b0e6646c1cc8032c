//! The router: an M/M/1/K queue with a switchable service rate.
//!
//! A [`Router`] keeps only its configuration and rate policy. Each call to
//! [`Router::run`] builds a fresh run state, drives it to termination and
//! returns an immutable [`SimulationRun`].
//!
//! Per iteration the loop
//! 1. asks the policy for a rate against the current buffer,
//! 2. pops the earliest event and stops if it lies beyond the horizon,
//! 3. records the rate, applies the transition and records the occupancy.

use std::collections::VecDeque;
use std::sync::Arc;

use crate::config::{RouterConfig, RunOptions};
use crate::dists::ProcessGenerator;
use crate::error::SimError;
use crate::logging::{diagnostics, event_span, events, simulation_span};
use crate::policy::{RatePolicy, ThresholdPolicy};
use crate::scheduler::{EventEntry, EventScheduler};
use crate::stats::{Counters, SimulationStats};
use crate::types::{Event, OccupancySample, RateSample, ServerPhase, Termination};
use crate::SimTime;

/// Single-server finite-capacity router.
///
/// # Example
/// ```
/// use turboq_core::{Router, RouterConfig};
///
/// let router = Router::new(RouterConfig::new(5.0, 3.0, 10)).unwrap();
/// let run = router.simulate(49.0, 200, Some(7)).unwrap();
///
/// let stats = run.stats();
/// assert!(stats.packets_delivered + stats.packets_lost <= 200);
/// assert_eq!(run.rates().len() + 1, run.occupancy().len());
/// ```
#[derive(Debug, Clone)]
pub struct Router {
    config: RouterConfig,
    policy: Arc<dyn RatePolicy>,
}

impl Router {
    /// Router with the threshold policy: turbo (2 × μ) once the buffer exceeds K/2.
    pub fn new(config: RouterConfig) -> Result<Self, SimError> {
        let policy = ThresholdPolicy::new(config.base_process_rate);
        Self::with_policy(config, policy)
    }

    pub fn with_policy(config: RouterConfig, policy: impl RatePolicy + 'static) -> Result<Self, SimError> {
        config.validate()?;
        Ok(Self {
            config,
            policy: Arc::new(policy),
        })
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn policy(&self) -> &dyn RatePolicy {
        self.policy.as_ref()
    }

    /// Run once with `packet_count` generated arrivals until `horizon` seconds.
    pub fn simulate(
        &self,
        horizon: f64,
        packet_count: usize,
        seed: Option<u64>,
    ) -> Result<SimulationRun, SimError> {
        self.run(&RunOptions {
            horizon,
            packet_count,
            seed,
        })
    }

    /// Run once with the given options.
    ///
    /// # Errors
    ///
    /// Configuration errors for an invalid horizon; `InvariantViolation` if the
    /// state machine ever reaches an inconsistent state.
    pub fn run(&self, options: &RunOptions) -> Result<SimulationRun, SimError> {
        let horizon = options.horizon_time()?;
        let span = simulation_span(self.policy.name());
        let _guard = span.enter();
        events::simulation_started(
            self.policy.name(),
            self.policy.base_rate(),
            horizon,
            options.packet_count,
            options.seed,
        );

        let mut generator = ProcessGenerator::new(options.seed);
        let arrivals = generator.generate_arrivals(self.config.arrival_rate, options.packet_count)?;
        let mut state = RunState::new(self.config, generator, &arrivals)?;

        let termination = loop {
            let rate = self
                .policy
                .select_rate(state.buffer.len(), self.config.capacity);
            let Some(entry) = state.scheduler.pop() else {
                break Termination::Drained;
            };
            if entry.time() > horizon {
                events::horizon_reached(horizon, entry.time(), state.scheduler.len());
                break Termination::HorizonReached;
            }
            state.step(entry, rate)?;
        };
        state.clamp_to_horizon(horizon);

        let final_time = state.occupancy.last().map_or(SimTime::zero(), |s| s.time);
        events::simulation_completed(final_time, state.events_processed, termination.as_str());

        Ok(state.finish(self.policy.as_ref(), *options, termination))
    }
}

/// Mutable state of a single run.
#[derive(Debug)]
pub(crate) struct RunState {
    capacity: usize,
    scheduler: EventScheduler,
    generator: ProcessGenerator,
    busy: bool,
    buffer: VecDeque<SimTime>,
    counters: Counters,
    occupancy: Vec<OccupancySample>,
    rates: Vec<RateSample>,
    events_processed: u64,
    config: RouterConfig,
}

impl RunState {
    fn new(
        config: RouterConfig,
        generator: ProcessGenerator,
        arrivals: &[SimTime],
    ) -> Result<Self, SimError> {
        let mut scheduler = EventScheduler::with_capacity(arrivals.len() + 1);
        for &arrival in arrivals {
            scheduler.schedule(Event::Arrival(arrival))?;
        }

        Ok(Self {
            capacity: config.capacity,
            scheduler,
            generator,
            busy: false,
            buffer: VecDeque::with_capacity(config.buffer_slots()),
            counters: Counters::default(),
            occupancy: vec![OccupancySample {
                time: SimTime::zero(),
                packets: 0,
            }],
            rates: Vec::new(),
            events_processed: 0,
            config,
        })
    }

    fn phase(&self) -> ServerPhase {
        match (self.busy, self.buffer.len()) {
            (false, _) => ServerPhase::Idle,
            (true, len) if len >= self.capacity - 1 => ServerPhase::Full,
            (true, _) => ServerPhase::Serving,
        }
    }

    fn packets_in_system(&self) -> usize {
        self.buffer.len() + usize::from(self.busy)
    }

    /// Apply one event that passed the horizon check, using `rate` for any
    /// service started while handling it.
    fn step(&mut self, entry: EventEntry, rate: f64) -> Result<(), SimError> {
        let time = entry.time();
        let _span = event_span(entry.id, entry.event.kind(), time).entered();
        if let Some(previous) = self.rates.last() {
            if previous.rate != rate {
                events::rate_switched(time, previous.rate, rate, self.buffer.len());
            }
        }
        self.rates.push(RateSample { time, rate });

        match entry.event {
            Event::Arrival(arrived) => self.on_arrival(arrived, rate)?,
            Event::ServiceCompletion(completed) => self.on_service_completion(completed, rate)?,
        }

        let packets = self.packets_in_system();
        self.occupancy.push(OccupancySample { time, packets });
        self.events_processed += 1;
        events::event_processed(entry.event.kind(), time, self.phase(), packets, rate);

        self.check_invariants(time)
    }

    fn on_arrival(&mut self, time: SimTime, rate: f64) -> Result<(), SimError> {
        if !self.busy {
            self.start_service(time, rate)
        } else if self.buffer.len() < self.capacity - 1 {
            self.buffer.push_back(time);
            Ok(())
        } else {
            self.counters.packets_lost += 1;
            events::packet_dropped(time, self.buffer.len(), self.counters.packets_lost);
            Ok(())
        }
    }

    fn on_service_completion(&mut self, time: SimTime, rate: f64) -> Result<(), SimError> {
        self.counters.packets_delivered += 1;
        match self.buffer.pop_front() {
            Some(arrived) => {
                self.counters.cumulative_waiting_time += time - arrived;
                self.start_service(time, rate)
            }
            None => {
                self.busy = false;
                Ok(())
            }
        }
    }

    fn start_service(&mut self, time: SimTime, rate: f64) -> Result<(), SimError> {
        let duration = self.generator.draw_service_duration(rate)?;
        self.scheduler.schedule(Event::ServiceCompletion(time + duration))?;
        self.counters.cumulative_busy_time += duration;
        self.busy = true;
        Ok(())
    }

    fn check_invariants(&self, time: SimTime) -> Result<(), SimError> {
        let detail = if self.buffer.len() > self.capacity - 1 {
            Some(format!(
                "buffer holds {} packets but only {} slots exist",
                self.buffer.len(),
                self.capacity - 1
            ))
        } else if !self.busy && !self.buffer.is_empty() {
            Some(format!(
                "server idle with {} packets buffered",
                self.buffer.len()
            ))
        } else if self.packets_in_system() > self.capacity {
            Some(format!(
                "{} packets in system exceeds capacity {}",
                self.packets_in_system(),
                self.capacity
            ))
        } else {
            None
        };

        match detail {
            None => Ok(()),
            Some(detail) => {
                diagnostics::simulation_inconsistency(time, &detail);
                Err(SimError::InvariantViolation { time, detail })
            }
        }
    }

    fn clamp_to_horizon(&mut self, horizon: SimTime) {
        if let Some(last) = self.occupancy.last_mut() {
            if last.time > horizon {
                last.time = horizon;
            }
        }
    }

    fn finish(self, policy: &dyn RatePolicy, options: RunOptions, termination: Termination) -> SimulationRun {
        let stats = SimulationStats::from_run(&self.counters, &self.occupancy, &self.rates);
        SimulationRun {
            config: self.config,
            policy: policy.name(),
            base_rate: policy.base_rate(),
            options,
            final_phase: self.phase(),
            occupancy: self.occupancy,
            rates: self.rates,
            counters: self.counters,
            events_processed: self.events_processed,
            termination,
            stats,
        }
    }
}

/// Immutable outcome of one run.
#[derive(Debug, Clone)]
pub struct SimulationRun {
    config: RouterConfig,
    policy: &'static str,
    base_rate: f64,
    options: RunOptions,
    occupancy: Vec<OccupancySample>,
    rates: Vec<RateSample>,
    counters: Counters,
    events_processed: u64,
    final_phase: ServerPhase,
    termination: Termination,
    stats: SimulationStats,
}

impl SimulationRun {
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Name of the rate policy that drove the run.
    pub fn policy_name(&self) -> &'static str {
        self.policy
    }

    /// Base service rate of that policy, the `μ` of the M/M/1/K baseline.
    pub fn base_rate(&self) -> f64 {
        self.base_rate
    }

    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    /// `(time, packets in system)` after every processed event, starting with `(0, 0)`.
    pub fn occupancy(&self) -> &[OccupancySample] {
        &self.occupancy
    }

    /// `(time, rate)` for every processed event; one entry shorter than [`Self::occupancy`].
    pub fn rates(&self) -> &[RateSample] {
        &self.rates
    }

    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    pub fn events_processed(&self) -> u64 {
        self.events_processed
    }

    /// Server phase when the loop stopped.
    pub fn final_phase(&self) -> ServerPhase {
        self.final_phase
    }

    pub fn termination(&self) -> Termination {
        self.termination
    }

    pub fn stats(&self) -> &SimulationStats {
        &self.stats
    }
}
