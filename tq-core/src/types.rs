//! Core type definitions for the router simulation

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::SimTime;

/// Insertion sequence number assigned by the scheduler.
///
/// Later insertions get larger ids; equal-time events are processed in id order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(pub u64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Event({})", self.0)
    }
}

/// A timestamped simulation event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// A packet reaches the router.
    Arrival(SimTime),
    /// The server finishes the packet it is working on.
    ServiceCompletion(SimTime),
}

impl Event {
    pub fn time(&self) -> SimTime {
        match *self {
            Event::Arrival(time) | Event::ServiceCompletion(time) => time,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Event::Arrival(_) => "arrival",
            Event::ServiceCompletion(_) => "service_completion",
        }
    }
}

/// Server phase derived from the busy flag and the buffer length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServerPhase {
    /// Server idle, buffer empty.
    Idle,
    /// Server busy with room left in the buffer.
    Serving,
    /// Server busy and all `K - 1` buffer slots taken.
    Full,
}

/// One point of the occupancy history: packets in system right after `time`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OccupancySample {
    pub time: SimTime,
    pub packets: usize,
}

/// One point of the rate history: the service rate in force for the event at `time`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateSample {
    pub time: SimTime,
    pub rate: f64,
}

/// Why the event loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// No pending events were left.
    Drained,
    /// The next event lay beyond the horizon and was discarded.
    HorizonReached,
}

impl Termination {
    pub fn as_str(&self) -> &'static str {
        match self {
            Termination::Drained => "drained",
            Termination::HorizonReached => "horizon_reached",
        }
    }
}
