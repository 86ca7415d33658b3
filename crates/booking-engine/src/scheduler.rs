//! All-or-nothing multi-party booking and forward slot search.
//!
//! `book` locks every participant's ledger in ascending [`ParticipantId`]
//! order, checks all of them, and only then commits to all of them. Two
//! bookings with overlapping participant sets therefore serialize instead of
//! deadlocking or double-booking.
//!
//! The suggestion search works on a snapshot taken under the same locks and
//! commits nothing. Its answer is advisory: a concurrent `book` may claim the
//! slot before the caller does.
//!
//! [`ParticipantId`]: crate::participant::ParticipantId

use std::sync::{Arc, MutexGuard};

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::config::SchedulerConfig;
use crate::conflict::Blocker;
use crate::error::{BookingError, Result};
use crate::interval::Interval;
use crate::ledger::Ledger;
use crate::meeting::{Meeting, MeetingState};
use crate::participant::Participant;

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    config: SchedulerConfig,
}

impl Scheduler {
    /// # Errors
    /// Returns `BookingError::Validation` if the config does not validate.
    pub fn new(config: SchedulerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Build a meeting of the configured duration.
    pub fn meeting(
        &self,
        participants: Vec<Arc<Participant>>,
        start: DateTime<Utc>,
        label: impl Into<String>,
    ) -> Result<Meeting> {
        Meeting::with_duration(participants, start, self.config.meeting_duration()?)
            .map(|meeting| meeting.with_label(label))
    }

    /// Book `interval` for every participant, or for none of them.
    ///
    /// Returns `false` without touching any ledger when at least one
    /// participant is busy, or when `participants` is empty.
    pub fn book(&self, participants: &[Arc<Participant>], interval: Interval, label: &str) -> bool {
        if participants.is_empty() {
            debug!(%interval, "refusing to book without participants");
            return false;
        }

        let mut ledgers = lock_in_order(participants);

        if let Some((busy, _)) = ledgers
            .iter()
            .find(|(_, ledger)| !ledger.is_available(&interval))
        {
            debug!(%interval, participant = busy.name(), "booking rejected");
            return false;
        }

        for (_, ledger) in ledgers.iter_mut() {
            ledger.add_booking(interval, label);
        }
        info!(%interval, label, participants = ledgers.len(), "booking committed");
        true
    }

    /// [`Scheduler::book`] for a meeting, recording the outcome in its state.
    pub fn book_meeting(&self, meeting: &mut Meeting) -> bool {
        let booked = self.book(meeting.participants(), meeting.interval(), meeting.label());
        meeting.set_state(if booked {
            MeetingState::Booked
        } else {
            MeetingState::Rejected
        });
        booked
    }

    /// Participants who cannot attend `interval`, with the slots in the way.
    pub fn busy_participants(
        &self,
        participants: &[Arc<Participant>],
        interval: Interval,
    ) -> Vec<Blocker> {
        participants
            .iter()
            .filter_map(|participant| {
                let conflicts = participant.conflicts(&interval);
                (!conflicts.is_empty()).then(|| Blocker {
                    participant: participant.name().to_string(),
                    conflicts,
                })
            })
            .collect()
    }

    /// First interval, starting at `interval` and advancing by the configured
    /// step, for which every participant is free. At most `max_iterations`
    /// candidates are tested.
    ///
    /// # Errors
    /// Returns `BookingError::NoSlotFound` when the bound is exhausted or the
    /// next candidate would pass the last representable instant, and
    /// `BookingError::Validation` when `participants` is empty.
    pub fn suggest_time(
        &self,
        participants: &[Arc<Participant>],
        interval: Interval,
        max_iterations: u32,
    ) -> Result<Interval> {
        self.search(participants, interval, |attempts, _| attempts < max_iterations)
    }

    /// Like [`Scheduler::suggest_time`], bounded by a horizon instead of a
    /// count: candidates starting at or after `horizon` are not considered.
    pub fn suggest_time_before(
        &self,
        participants: &[Arc<Participant>],
        interval: Interval,
        horizon: DateTime<Utc>,
    ) -> Result<Interval> {
        self.search(participants, interval, |_, candidate| candidate.start() < horizon)
    }

    /// [`Scheduler::suggest_time`] for a meeting, bounded by the configured
    /// iteration limit.
    pub fn suggest_meeting_time(&self, meeting: &Meeting) -> Result<Interval> {
        self.suggest_time(
            meeting.participants(),
            meeting.interval(),
            self.config.max_search_iterations,
        )
    }

    fn search(
        &self,
        participants: &[Arc<Participant>],
        from: Interval,
        within_bound: impl Fn(u32, &Interval) -> bool,
    ) -> Result<Interval> {
        if participants.is_empty() {
            return Err(BookingError::Validation(
                "cannot search for a slot without participants".to_string(),
            ));
        }

        let ledgers: Vec<Ledger> = lock_in_order(participants)
            .into_iter()
            .map(|(_, ledger)| ledger.clone())
            .collect();
        let step = self.config.search_step()?;

        let mut candidate = from;
        let mut attempts = 0;
        while within_bound(attempts, &candidate) {
            attempts += 1;
            if ledgers.iter().all(|ledger| ledger.is_available(&candidate)) {
                debug!(attempts, %candidate, "found mutually free slot");
                return Ok(candidate);
            }
            match candidate.shifted(step) {
                Some(next) => candidate = next,
                None => break,
            }
        }

        warn!(attempts, from = %from, "slot search exhausted its bound");
        Err(BookingError::NoSlotFound {
            from: from.start(),
            attempts,
        })
    }
}

/// Lock each distinct participant's ledger in ascending id order.
fn lock_in_order(participants: &[Arc<Participant>]) -> Vec<(&Participant, MutexGuard<'_, Ledger>)> {
    let mut ordered: Vec<&Participant> = participants.iter().map(Arc::as_ref).collect();
    ordered.sort_by_key(|participant| participant.id());
    ordered.dedup_by_key(|participant| participant.id());
    ordered
        .into_iter()
        .map(|participant| (participant, participant.ledger()))
        .collect()
}
