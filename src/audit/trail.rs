use std::cell::RefCell;
use std::collections::VecDeque;

use super::{GuardEvent, GuardOutcome};

/// Events kept by [`AuditTrail::new`].
pub const DEFAULT_CAPACITY: usize = 512;

/// In-memory, bounded record of guard decisions.
///
/// Holds at most `capacity` events; recording past that evicts the oldest.
/// Meant for diagnostics panels and tests; a deployment that ships events to
/// a backend can drain it with [`take`](Self::take).
///
/// # Example
///
/// ```
/// use route_guard::audit::{AuditTrail, GuardEvent};
///
/// let trail = AuditTrail::new();
/// trail.record(GuardEvent::allowed(1, "/customer/orders", "u-1"));
/// assert_eq!(trail.len(), 1);
/// ```
#[derive(Debug)]
pub struct AuditTrail {
    events: RefCell<VecDeque<GuardEvent>>,
    capacity: usize,
}

impl Default for AuditTrail {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl AuditTrail {
    /// Creates an empty trail holding up to [`DEFAULT_CAPACITY`] events.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty trail holding up to `capacity` events (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            events: RefCell::new(VecDeque::with_capacity(capacity.min(DEFAULT_CAPACITY))),
            capacity,
        }
    }

    /// Maximum number of events kept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Appends an event, evicting the oldest one when full.
    pub fn record(&self, event: GuardEvent) {
        let mut events = self.events.borrow_mut();
        if events.len() == self.capacity {
            events.pop_front();
        }
        events.push_back(event);
    }

    /// Snapshot of all events, oldest first.
    pub fn events(&self) -> Vec<GuardEvent> {
        self.events.borrow().iter().cloned().collect()
    }

    /// Events with the given outcome.
    pub fn with_outcome(&self, outcome: GuardOutcome) -> Vec<GuardEvent> {
        self.events
            .borrow()
            .iter()
            .filter(|e| e.outcome() == outcome)
            .cloned()
            .collect()
    }

    /// Most recent event, if any.
    pub fn last(&self) -> Option<GuardEvent> {
        self.events.borrow().back().cloned()
    }

    /// Removes and returns all events.
    pub fn take(&self) -> Vec<GuardEvent> {
        self.events.borrow_mut().drain(..).collect()
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}
