//! Error types for the router simulation

use thiserror::Error;

use crate::SimTime;

/// Top-level error type for simulation operations
#[derive(Debug, Error)]
pub enum SimError {
    #[error("Event error: {0}")]
    Event(#[from] EventError),

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Time validation error: {0} seconds is not a representable simulation time")]
    InvalidTime(f64),

    #[error("Internal consistency failure at {time}: {detail}")]
    InvariantViolation { time: SimTime, detail: String },
}

/// Errors related to event scheduling
#[derive(Debug, Error)]
pub enum EventError {
    #[error("Event scheduling failed: event at {event_time} is earlier than the clock ({now})")]
    ScheduleInPast { event_time: SimTime, now: SimTime },
}
