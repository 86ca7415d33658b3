//! Minute-resolution time intervals and the conflict predicate.
//!
//! Intervals are truncated to whole minutes on construction. Two intervals
//! conflict when they share at least one instant; intervals that merely touch
//! (one ends exactly when the other starts) are back-to-back and do NOT conflict.

use chrono::{DateTime, Duration, Timelike, Utc};
use serde::Serialize;

use crate::error::{BookingError, Result};

/// Discard the seconds and sub-second components of an instant.
pub fn truncate_to_minute(at: DateTime<Utc>) -> DateTime<Utc> {
    at - Duration::seconds(i64::from(at.second())) - Duration::nanoseconds(i64::from(at.nanosecond()))
}

/// A time range `[start, end)` with `start < end`, both on a minute boundary.
///
/// Only obtainable through [`Interval::new`] or [`Interval::starting_at`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Interval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl Interval {
    /// Build an interval, truncating both endpoints to the minute.
    ///
    /// # Errors
    /// Returns `BookingError::Validation` if `start >= end` after truncation.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        let start = truncate_to_minute(start);
        let end = truncate_to_minute(end);
        if start >= end {
            return Err(BookingError::Validation(format!(
                "interval start {start} must be before end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Build an interval of `duration` beginning at `start` (truncated to the minute).
    ///
    /// # Errors
    /// Returns `BookingError::Validation` if `duration` is shorter than one minute
    /// or the end would fall past the last representable instant.
    pub fn starting_at(start: DateTime<Utc>, duration: Duration) -> Result<Self> {
        if duration < Duration::minutes(1) {
            return Err(BookingError::Validation(format!(
                "duration must be at least one minute, got {} seconds",
                duration.num_seconds()
            )));
        }
        let start = truncate_to_minute(start);
        let end = start.checked_add_signed(duration).ok_or_else(|| {
            BookingError::Validation(format!(
                "interval starting {start} with a duration of {} minutes ends out of range",
                duration.num_minutes()
            ))
        })?;
        Self::new(start, end)
    }

    /// Inclusive start, on a minute boundary.
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Exclusive end, on a minute boundary.
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Length of the interval in whole minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// The same interval moved forward (or backward) by `by`. Duration is preserved.
    ///
    /// `None` if either endpoint would leave the representable range.
    pub fn shifted(&self, by: Duration) -> Option<Self> {
        Some(Self {
            start: self.start.checked_add_signed(by)?,
            end: self.end.checked_add_signed(by)?,
        })
    }

    /// True iff the two intervals share any instant.
    ///
    /// Touching endpoints are not a conflict. An exact duplicate always is.
    pub fn conflicts_with(&self, other: &Interval) -> bool {
        !(other.end <= self.start || other.start >= self.end) || self == other
    }

    /// Minutes shared by two intervals, zero when they do not conflict.
    pub fn overlap_minutes(&self, other: &Interval) -> i64 {
        if !self.conflicts_with(other) {
            return 0;
        }
        let overlap_start = self.start.max(other.start);
        let overlap_end = self.end.min(other.end);
        (overlap_end - overlap_start).num_minutes()
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start.format("%Y-%m-%d %H:%M"),
            self.end.format("%Y-%m-%d %H:%M")
        )
    }
}
