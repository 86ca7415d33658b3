//! Meetings: a candidate interval shared by a set of participants.
//!
//! A meeting moves `Proposed -> Booked | Rejected` when the scheduler books it,
//! and `Booked -> Started` when started at its scheduled minute.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::info;

use crate::config::DEFAULT_MEETING_DURATION_MINUTES;
use crate::error::{BookingError, Result};
use crate::interval::{truncate_to_minute, Interval};
use crate::participant::Participant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum MeetingState {
    #[default]
    Proposed,
    Booked,
    Rejected,
    Started,
}

#[derive(Debug, Clone)]
pub struct Meeting {
    participants: Vec<Arc<Participant>>,
    interval: Interval,
    label: String,
    state: MeetingState,
}

impl Meeting {
    /// A meeting of the built-in 60-minute default starting at `start`
    /// (truncated to the minute). It does not consult any `SchedulerConfig`;
    /// use [`Scheduler::meeting`] for the configured duration.
    ///
    /// # Errors
    /// Returns `BookingError::Validation` if `participants` is empty or the
    /// meeting would end past the last representable instant.
    ///
    /// [`Scheduler::meeting`]: crate::scheduler::Scheduler::meeting
    pub fn new(participants: Vec<Arc<Participant>>, start: DateTime<Utc>) -> Result<Self> {
        Self::with_duration(
            participants,
            start,
            Duration::minutes(DEFAULT_MEETING_DURATION_MINUTES),
        )
    }

    /// A meeting of arbitrary length. Participants listed twice are kept once.
    ///
    /// # Errors
    /// Returns `BookingError::Validation` if `participants` is empty or
    /// `duration` is shorter than one minute.
    pub fn with_duration(
        participants: Vec<Arc<Participant>>,
        start: DateTime<Utc>,
        duration: Duration,
    ) -> Result<Self> {
        if participants.is_empty() {
            return Err(BookingError::Validation(
                "a meeting needs at least one participant".to_string(),
            ));
        }
        let interval = Interval::starting_at(start, duration)?;

        let mut seen = HashSet::new();
        let participants = participants
            .into_iter()
            .filter(|p| seen.insert(p.id()))
            .collect();

        Ok(Self {
            participants,
            interval,
            label: String::new(),
            state: MeetingState::Proposed,
        })
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn participants(&self) -> &[Arc<Participant>] {
        &self.participants
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn state(&self) -> MeetingState {
        self.state
    }

    pub fn started(&self) -> bool {
        self.state == MeetingState::Started
    }

    pub(crate) fn set_state(&mut self, state: MeetingState) {
        self.state = state;
    }

    /// Start the meeting. Only allowed during its scheduled start minute.
    ///
    /// # Errors
    /// Returns `BookingError::InvalidState` when `now`, truncated to the minute,
    /// differs from the interval start.
    pub fn start(&mut self, now: DateTime<Utc>) -> Result<bool> {
        let now = truncate_to_minute(now);
        if now != self.interval.start() {
            return Err(BookingError::InvalidState {
                scheduled: self.interval.start(),
                now,
            });
        }
        self.state = MeetingState::Started;
        info!(interval = %self.interval, label = %self.label, "meeting started");
        Ok(true)
    }
}
