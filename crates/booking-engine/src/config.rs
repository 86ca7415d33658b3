//! Scheduler tuning: meeting length, search step and search bound.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::{BookingError, Result};

pub const DEFAULT_MEETING_DURATION_MINUTES: i64 = 60;
pub const DEFAULT_SEARCH_STEP_MINUTES: i64 = 30;
/// Two weeks of half-hour steps.
pub const DEFAULT_MAX_SEARCH_ITERATIONS: u32 = 672;
/// Upper bound for the meeting duration and the search step: one leap year.
pub const MAX_CONFIGURED_MINUTES: i64 = 366 * 24 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Length of meetings built with [`crate::scheduler::Scheduler::meeting`].
    pub meeting_duration_minutes: i64,
    /// How far the suggestion search advances the candidate per attempt.
    pub search_step_minutes: i64,
    /// Candidates the suggestion search may test before giving up.
    pub max_search_iterations: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            meeting_duration_minutes: DEFAULT_MEETING_DURATION_MINUTES,
            search_step_minutes: DEFAULT_SEARCH_STEP_MINUTES,
            max_search_iterations: DEFAULT_MAX_SEARCH_ITERATIONS,
        }
    }
}

impl SchedulerConfig {
    /// # Errors
    /// Returns `BookingError::Validation` when the duration or step is not in
    /// `1..=MAX_CONFIGURED_MINUTES`, or the iteration bound is zero.
    pub fn validate(&self) -> Result<()> {
        check_minutes("meeting_duration_minutes", self.meeting_duration_minutes)?;
        check_minutes("search_step_minutes", self.search_step_minutes)?;
        if self.max_search_iterations == 0 {
            return Err(BookingError::Validation(
                "max_search_iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// # Errors
    /// Returns `BookingError::Validation` if the duration is out of range.
    pub fn meeting_duration(&self) -> Result<Duration> {
        minutes("meeting_duration_minutes", self.meeting_duration_minutes)
    }

    /// # Errors
    /// Returns `BookingError::Validation` if the step is out of range.
    pub fn search_step(&self) -> Result<Duration> {
        minutes("search_step_minutes", self.search_step_minutes)
    }
}

fn check_minutes(field: &str, value: i64) -> Result<()> {
    if value <= 0 {
        return Err(BookingError::Validation(format!(
            "{field} must be positive, got {value}"
        )));
    }
    if value > MAX_CONFIGURED_MINUTES {
        return Err(BookingError::Validation(format!(
            "{field} must be at most {MAX_CONFIGURED_MINUTES}, got {value}"
        )));
    }
    Ok(())
}

fn minutes(field: &str, value: i64) -> Result<Duration> {
    check_minutes(field, value)?;
    Duration::try_minutes(value)
        .ok_or_else(|| BookingError::Validation(format!("{field} is out of range: {value}")))
}
