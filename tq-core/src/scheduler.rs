use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::error::EventError;
use crate::types::{Event, EventId};
use crate::SimTime;

/// Entry stored in the scheduler: the event plus its insertion sequence number.
///
/// Entries are totally ordered by `(time, id)`, so two events with the same
/// timestamp come out in the order they were scheduled.
#[derive(Debug, Clone, Copy)]
pub struct EventEntry {
    pub id: EventId,
    pub event: Event,
}

impl EventEntry {
    pub fn time(&self) -> SimTime {
        self.event.time()
    }
}

impl PartialEq for EventEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for EventEntry {}

impl PartialOrd for EventEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EventEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for min-heap behavior in BinaryHeap
        other
            .time()
            .cmp(&self.time())
            .then_with(|| other.id.cmp(&self.id))
    }
}

/// Pending-event set of one run.
///
/// Keeps the current simulation time and yields events in non-decreasing time
/// order, O(log n) per insert and extract.
#[derive(Debug, Default)]
pub struct EventScheduler {
    next_event_id: u64,
    events: BinaryHeap<EventEntry>,
    now: SimTime,
}

impl EventScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-sized scheduler, used when the whole arrival stream is known up front.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: BinaryHeap::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Schedules `event` at its own timestamp.
    ///
    /// # Errors
    ///
    /// Fails if the event lies before the current time.
    pub fn schedule(&mut self, event: Event) -> Result<EventId, EventError> {
        if event.time() < self.now {
            return Err(EventError::ScheduleInPast {
                event_time: event.time(),
                now: self.now,
            });
        }
        let id = EventId(self.next_event_id);
        self.next_event_id += 1;
        self.events.push(EventEntry { id, event });
        Ok(id)
    }

    /// Returns the current simulation time.
    #[must_use]
    pub fn time(&self) -> SimTime {
        self.now
    }

    /// Returns a reference to the next scheduled event or `None` if none are left.
    pub fn peek(&self) -> Option<&EventEntry> {
        self.events.peek()
    }

    /// Removes and returns the next scheduled event, advancing the clock to it.
    pub fn pop(&mut self) -> Option<EventEntry> {
        self.events.pop().inspect(|entry| {
            self.now = entry.time();
        })
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_event_entry_cmp() {
        let early = EventEntry {
            id: EventId(5),
            event: Event::Arrival(SimTime::from_secs(1)),
        };
        let late = EventEntry {
            id: EventId(0),
            event: Event::Arrival(SimTime::from_secs(2)),
        };
        // Earlier time is "greater" so that it sits on top of the max-heap
        assert_eq!(early.cmp(&late), Ordering::Greater);

        let first = EventEntry {
            id: EventId(1),
            event: Event::ServiceCompletion(SimTime::from_secs(1)),
        };
        assert_eq!(first.cmp(&early), Ordering::Greater);
    }

    #[test]
    fn test_scheduler_orders_by_time() {
        let mut scheduler = EventScheduler::new();
        assert_eq!(scheduler.time(), SimTime::zero());
        assert!(scheduler.is_empty());

        scheduler.schedule(Event::Arrival(SimTime::from_secs(3))).unwrap();
        scheduler.schedule(Event::Arrival(SimTime::from_secs(1))).unwrap();
        scheduler
            .schedule(Event::ServiceCompletion(SimTime::from_secs(2)))
            .unwrap();
        assert_eq!(scheduler.len(), 3);
        assert_eq!(scheduler.peek().map(EventEntry::time), Some(SimTime::from_secs(1)));

        let times: Vec<SimTime> = std::iter::from_fn(|| scheduler.pop().map(|e| e.time())).collect();
        assert_eq!(
            times,
            vec![SimTime::from_secs(1), SimTime::from_secs(2), SimTime::from_secs(3)]
        );
        assert_eq!(scheduler.time(), SimTime::from_secs(3));
        assert!(scheduler.pop().is_none());
    }

    #[test]
    fn test_equal_times_pop_in_insertion_order() {
        let mut scheduler = EventScheduler::new();
        let t = SimTime::from_millis(500);
        let a = scheduler.schedule(Event::Arrival(t)).unwrap();
        let b = scheduler.schedule(Event::ServiceCompletion(t)).unwrap();
        let c = scheduler.schedule(Event::Arrival(t)).unwrap();

        let ids: Vec<EventId> = std::iter::from_fn(|| scheduler.pop().map(|e| e.id)).collect();
        assert_eq!(ids, vec![a, b, c]);
    }

    #[test]
    fn test_equal_times_large_batch_is_fifo() {
        let mut scheduler = EventScheduler::with_capacity(256);
        for _ in 0..256 {
            scheduler.schedule(Event::Arrival(SimTime::zero())).unwrap();
        }
        let ids: Vec<u64> = std::iter::from_fn(|| scheduler.pop().map(|e| e.id.0)).collect();
        assert_eq!(ids, (0..256).collect::<Vec<_>>());
    }

    #[test]
    fn test_schedule_in_past_is_rejected() {
        let mut scheduler = EventScheduler::new();
        scheduler.schedule(Event::Arrival(SimTime::from_secs(2))).unwrap();
        scheduler.pop().unwrap();

        let err = scheduler
            .schedule(Event::ServiceCompletion(SimTime::from_secs(1)))
            .unwrap_err();
        assert!(matches!(err, EventError::ScheduleInPast { .. }));
        // Scheduling at the current instant is fine
        assert!(scheduler
            .schedule(Event::ServiceCompletion(SimTime::from_secs(2)))
            .is_ok());
    }
}
