//! Per-participant record of booked slots.
//!
//! A [`Ledger`] is append-only and kept sorted by start time on insert, so
//! listing never reorders anything behind the caller's back. It performs no
//! locking of its own; [`crate::participant::Participant`] wraps it in a mutex.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::conflict::{self, Conflict};
use crate::interval::{truncate_to_minute, Interval};

/// A committed booking: the reserved interval and the meeting's label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookedSlot {
    pub interval: Interval,
    pub label: String,
}

/// Booked slots ordered by `(start, end)`; ties keep insertion order.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    slots: Vec<BookedSlot>,
}

impl Ledger {
    /// An empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of booked slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when nothing is booked.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Booked slots in `(start, end)` order.
    pub fn slots(&self) -> &[BookedSlot] {
        &self.slots
    }

    /// True iff `candidate` conflicts with none of the booked slots.
    pub fn is_available(&self, candidate: &Interval) -> bool {
        // Slots are sorted by start, so nothing starting at or after the
        // candidate's end can overlap it.
        !self
            .slots
            .iter()
            .take_while(|slot| slot.interval.start() < candidate.end())
            .any(|slot| slot.interval.conflicts_with(candidate))
    }

    /// Record a booking without checking for conflicts.
    pub fn add_booking(&mut self, candidate: Interval, label: impl Into<String>) {
        let at = self
            .slots
            .partition_point(|slot| slot.interval <= candidate);
        self.slots.insert(
            at,
            BookedSlot {
                interval: candidate,
                label: label.into(),
            },
        );
    }

    /// Every booked slot that conflicts with `candidate`, with its overlap.
    pub fn conflicts(&self, candidate: &Interval) -> Vec<Conflict> {
        conflict::find_conflicts(&self.slots, candidate)
    }

    /// Booked slots as a new vector, ascending by start.
    ///
    /// With `upcoming_only`, only slots starting at or after `now` (truncated to
    /// the minute) are returned.
    pub fn list_appointments(&self, upcoming_only: bool, now: DateTime<Utc>) -> Vec<BookedSlot> {
        if !upcoming_only {
            return self.slots.clone();
        }
        let now = truncate_to_minute(now);
        let first_upcoming = self.slots.partition_point(|slot| slot.interval.start() < now);
        self.slots[first_upcoming..].to_vec()
    }
}
