//! Error types for booking-engine operations.

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BookingError {
    /// Rejected at construction time: empty participant set, non-positive
    /// duration, an interval whose start is not before its end, or time
    /// arithmetic that leaves the representable range.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A meeting was started outside its scheduled start minute.
    #[error("Invalid state: cannot start a meeting scheduled for {scheduled} at {now}")]
    InvalidState {
        scheduled: DateTime<Utc>,
        now: DateTime<Utc>,
    },

    /// The slot search exhausted its bound without finding a mutually free slot.
    #[error("No slot found after {attempts} attempts starting from {from}")]
    NoSlotFound {
        from: DateTime<Utc>,
        attempts: u32,
    },
}

pub type Result<T> = std::result::Result<T, BookingError>;
