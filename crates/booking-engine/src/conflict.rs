//! Explain why a candidate interval cannot be booked.
//!
//! Compares a candidate against booked slots and reports each one it collides
//! with. Adjacent slots (where one ends exactly when the other starts) are NOT
//! conflicts.

use serde::Serialize;

use crate::interval::Interval;
use crate::ledger::BookedSlot;

/// A booked slot that blocks a candidate interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conflict {
    pub slot: BookedSlot,
    pub overlap_minutes: i64,
}

/// Find every booked slot that conflicts with `candidate`.
///
/// The overlap duration is `min(a.end, b.end) - max(a.start, b.start)`.
pub fn find_conflicts(slots: &[BookedSlot], candidate: &Interval) -> Vec<Conflict> {
    slots
        .iter()
        .filter(|slot| slot.interval.conflicts_with(candidate))
        .map(|slot| Conflict {
            slot: slot.clone(),
            overlap_minutes: slot.interval.overlap_minutes(candidate),
        })
        .collect()
}

/// A participant who cannot attend a candidate interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Blocker {
    pub participant: String,
    pub conflicts: Vec<Conflict>,
}
