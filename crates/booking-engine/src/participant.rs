//! Participants: identity plus a lock-guarded [`Ledger`].
//!
//! Participants are shared between meetings through `Arc<Participant>`. Each
//! carries a process-unique [`ParticipantId`] that the scheduler uses to lock
//! ledgers in a single global order.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::conflict::Conflict;
use crate::interval::Interval;
use crate::ledger::{BookedSlot, Ledger};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identity used for lock ordering and de-duplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ParticipantId(u64);

impl ParticipantId {
    fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug)]
pub struct Participant {
    id: ParticipantId,
    name: String,
    contact: String,
    ledger: Mutex<Ledger>,
}

impl Participant {
    pub fn new(name: impl Into<String>, contact: impl Into<String>) -> Self {
        Self {
            id: ParticipantId::next(),
            name: name.into(),
            contact: contact.into(),
            ledger: Mutex::new(Ledger::new()),
        }
    }

    /// Convenience for the common case of a participant shared across meetings.
    pub fn shared(name: impl Into<String>, contact: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::new(name, contact))
    }

    /// Process-unique id; fixes this participant's place in the lock order.
    pub fn id(&self) -> ParticipantId {
        self.id
    }

    /// Display name. Not required to be unique.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Contact address, e.g. an email.
    pub fn contact(&self) -> &str {
        &self.contact
    }

    /// Lock this participant's ledger.
    ///
    /// A poisoned lock is recovered: every ledger mutation is a single insert,
    /// so a panicking holder cannot leave it half-written.
    pub(crate) fn ledger(&self) -> MutexGuard<'_, Ledger> {
        self.ledger.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// True iff `candidate` conflicts with none of this participant's bookings.
    pub fn is_available(&self, candidate: &Interval) -> bool {
        self.ledger().is_available(candidate)
    }

    /// Record a booking without a conflict check. Multi-party bookings go
    /// through [`crate::scheduler::Scheduler::book`], which checks first.
    pub fn add_booking(&self, candidate: Interval, label: impl Into<String>) {
        self.ledger().add_booking(candidate, label);
    }

    /// Bookings ascending by start; see [`Ledger::list_appointments`].
    pub fn list_appointments(&self, upcoming_only: bool, now: DateTime<Utc>) -> Vec<BookedSlot> {
        self.ledger().list_appointments(upcoming_only, now)
    }

    /// Bookings that block `candidate`, with their overlap.
    pub fn conflicts(&self, candidate: &Interval) -> Vec<Conflict> {
        self.ledger().conflicts(candidate)
    }

    pub fn booking_count(&self) -> usize {
        self.ledger().len()
    }
}
