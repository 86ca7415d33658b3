//! Scenario files: a roster of participants and the meetings to book, in order.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use booking_engine::{Blocker, Interval, Meeting, MeetingState, Participant, Scheduler, SchedulerConfig};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub config: SchedulerConfig,
    pub participants: Vec<ParticipantSpec>,
    #[serde(default)]
    pub meetings: Vec<MeetingSpec>,
}

#[derive(Debug, Deserialize)]
pub struct ParticipantSpec {
    pub name: String,
    #[serde(default)]
    pub contact: String,
}

#[derive(Debug, Deserialize)]
pub struct MeetingSpec {
    pub participants: Vec<String>,
    pub start: DateTime<Utc>,
    #[serde(default)]
    pub label: String,
    /// Overrides the configured meeting duration for this meeting only.
    #[serde(default)]
    pub duration_minutes: Option<i64>,
}

/// Outcome of booking one scenario meeting.
#[derive(Debug, Serialize)]
pub struct MeetingReport {
    pub index: usize,
    pub label: String,
    pub participants: Vec<String>,
    pub interval: Interval,
    pub state: MeetingState,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub busy: Vec<Blocker>,
}

/// A scenario after all of its meetings have been put through the scheduler.
pub struct Session {
    pub scheduler: Scheduler,
    pub meetings: Vec<Meeting>,
    pub reports: Vec<MeetingReport>,
    roster: HashMap<String, Arc<Participant>>,
}

impl Scenario {
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse scenario JSON")
    }

    /// Build the roster and book every meeting in file order.
    pub fn replay(self) -> Result<Session> {
        let scheduler = Scheduler::new(self.config).context("Invalid scheduler config")?;

        let mut roster = HashMap::new();
        for spec in self.participants {
            let participant = Participant::shared(spec.name.clone(), spec.contact);
            if roster.insert(spec.name.clone(), participant).is_some() {
                bail!("Duplicate participant name: '{}'", spec.name);
            }
        }

        let mut session = Session {
            scheduler,
            meetings: Vec::with_capacity(self.meetings.len()),
            reports: Vec::with_capacity(self.meetings.len()),
            roster,
        };
        for (index, spec) in self.meetings.into_iter().enumerate() {
            session
                .book(index, spec)
                .with_context(|| format!("Invalid meeting #{}", index))?;
        }

        info!(
            participants = session.roster.len(),
            meetings = session.meetings.len(),
            "scenario replayed"
        );
        Ok(session)
    }
}

impl Session {
    pub fn participant(&self, name: &str) -> Result<&Arc<Participant>> {
        self.roster
            .get(name)
            .with_context(|| format!("Unknown participant: '{}'", name))
    }

    pub fn participants(&self, names: &[String]) -> Result<Vec<Arc<Participant>>> {
        names
            .iter()
            .map(|name| self.participant(name).cloned())
            .collect()
    }

    /// Build a meeting with the configured duration, or an explicit one.
    pub fn meeting(
        &self,
        names: &[String],
        start: DateTime<Utc>,
        duration_minutes: Option<i64>,
        label: &str,
    ) -> Result<Meeting> {
        let participants = self.participants(names)?;
        let meeting = match duration_minutes {
            Some(minutes) => {
                let duration = Duration::try_minutes(minutes)
                    .with_context(|| format!("Meeting duration out of range: {} minutes", minutes))?;
                Meeting::with_duration(participants, start, duration)?.with_label(label)
            }
            None => self.scheduler.meeting(participants, start, label)?,
        };
        Ok(meeting)
    }

    fn book(&mut self, index: usize, spec: MeetingSpec) -> Result<()> {
        let mut meeting =
            self.meeting(&spec.participants, spec.start, spec.duration_minutes, &spec.label)?;

        let booked = self.scheduler.book_meeting(&mut meeting);
        let busy = if booked {
            Vec::new()
        } else {
            self.scheduler
                .busy_participants(meeting.participants(), meeting.interval())
        };
        debug!(index, booked, interval = %meeting.interval(), "meeting replayed");

        self.reports.push(MeetingReport {
            index,
            label: meeting.label().to_string(),
            participants: meeting
                .participants()
                .iter()
                .map(|p| p.name().to_string())
                .collect(),
            interval: meeting.interval(),
            state: meeting.state(),
            busy,
        });
        self.meetings.push(meeting);
        Ok(())
    }
}
