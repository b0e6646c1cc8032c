//! Structured logging for router simulations
//!
//! Logging goes through `tracing`; the helpers here install a
//! `tracing-subscriber` formatter and provide the structured events the engine
//! emits.
//!
//! # Controlling output
//!
//! ```rust
//! use turboq_core::init_simulation_logging_with_level;
//! init_simulation_logging_with_level("debug");
//! ```
//!
//! `RUST_LOG` takes precedence when set:
//!
//! ```bash
//! RUST_LOG=turboq_core::engine=trace cargo run --example router
//! ```
//!
//! Level guidelines:
//! - **TRACE**: every processed event
//! - **DEBUG**: rate switches and dropped packets
//! - **INFO**: run start and completion
//! - **ERROR**: internal consistency failures

use crate::{EventId, ServerPhase, SimTime};
use tracing::{info, Span};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging at `info`
pub fn init_simulation_logging() {
    init_simulation_logging_with_level("info")
}

/// Initialize logging with a specific level
///
/// Safe to call more than once; only the first call installs a subscriber.
///
/// # Arguments
/// * `level` - Log level: "trace", "debug", "info", "warn", or "error"
pub fn init_simulation_logging_with_level(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("turboq={level},turboq_core={level},turboq_metrics={level},turboq_viz={level}").into()
    });

    let installed = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter)
        .try_init()
        .is_ok();

    if installed {
        info!("Simulation logging initialized at level: {}", level);
    }
}

/// Trace everything, pretty-printed
pub fn init_detailed_simulation_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "trace,turboq_core=trace,turboq_metrics=debug".into());

    let installed = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_file(true)
                .with_line_number(true)
                .pretty(),
        )
        .with(filter)
        .try_init()
        .is_ok();

    if installed {
        info!("Detailed simulation logging initialized");
    }
}

/// Span covering one simulation run
pub fn simulation_span(name: &str) -> Span {
    tracing::info_span!("simulation", name = name)
}

/// Span covering the processing of a single event
pub fn event_span(event_id: EventId, event_type: &str, time: SimTime) -> Span {
    tracing::trace_span!("event",
        id = %event_id,
        event_type = event_type,
        time = %time
    )
}

/// Structured events emitted by the engine
pub mod events {
    use super::*;
    use tracing::{debug, trace};

    pub fn simulation_started(
        policy: &str,
        base_rate: f64,
        horizon: SimTime,
        packet_count: usize,
        seed: Option<u64>,
    ) {
        info!(
            policy = policy,
            base_rate = base_rate,
            horizon = %horizon,
            packet_count = packet_count,
            seed = ?seed,
            "Simulation started"
        );
    }

    pub fn simulation_completed(final_time: SimTime, events_processed: u64, termination: &str) {
        info!(
            final_time = %final_time,
            events_processed = events_processed,
            termination = termination,
            "Simulation completed"
        );
    }

    pub fn event_processed(
        event_type: &str,
        time: SimTime,
        phase: ServerPhase,
        packets_in_system: usize,
        rate: f64,
    ) {
        trace!(
            event_type = event_type,
            time = %time,
            phase = ?phase,
            packets_in_system = packets_in_system,
            rate = rate,
            "Processed event"
        );
    }

    pub fn packet_dropped(time: SimTime, buffer_len: usize, packets_lost: u64) {
        debug!(
            time = %time,
            buffer_len = buffer_len,
            packets_lost = packets_lost,
            "Buffer full, packet dropped"
        );
    }

    pub fn rate_switched(time: SimTime, old_rate: f64, new_rate: f64, buffer_len: usize) {
        debug!(
            time = %time,
            old_rate = old_rate,
            new_rate = new_rate,
            buffer_len = buffer_len,
            "Service rate switched"
        );
    }

    pub fn horizon_reached(horizon: SimTime, discarded_at: SimTime, pending_events: usize) {
        debug!(
            horizon = %horizon,
            discarded_at = %discarded_at,
            pending_events = pending_events,
            "Next event beyond horizon, stopping"
        );
    }
}

/// Logging for error conditions
pub mod diagnostics {
    use super::*;
    use tracing::error;

    /// Log simulation inconsistency
    pub fn simulation_inconsistency(time: SimTime, description: &str) {
        error!(
            time = %time,
            description = description,
            "Simulation inconsistency detected"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_initialization_is_idempotent() {
        init_simulation_logging_with_level("debug");
        init_simulation_logging_with_level("trace");
        init_detailed_simulation_logging();
    }

    #[test]
    fn test_span_creation() {
        let _sim_span = simulation_span("test_simulation");
        let _event_span = event_span(EventId(1), "arrival", SimTime::from_millis(100));
    }

    #[test]
    fn test_event_logging() {
        events::simulation_started("threshold", 3.0, SimTime::from_secs(10), 20, Some(1));
        events::event_processed("arrival", SimTime::from_millis(100), ServerPhase::Serving, 1, 3.0);
        events::packet_dropped(SimTime::from_millis(200), 9, 1);
        events::rate_switched(SimTime::from_millis(300), 3.0, 6.0, 6);
        events::horizon_reached(SimTime::from_secs(10), SimTime::from_secs(11), 4);
        events::simulation_completed(SimTime::from_secs(5), 100, "drained");
        diagnostics::simulation_inconsistency(SimTime::zero(), "test only");
    }
}
