//! # booking-engine
//!
//! All-or-nothing meeting booking across participants who each keep their own
//! calendar of booked slots.
//!
//! A meeting is booked only if every participant is free for its interval; if
//! anyone is busy, nobody's calendar changes. When the requested time is taken,
//! the scheduler can search forward in fixed steps for the nearest slot where
//! everyone is free. The current instant is always passed in by the caller.
//!
//! ## Quick start
//!
//! ```rust
//! use booking_engine::{Participant, Scheduler};
//! use chrono::{TimeZone, Utc};
//!
//! let esh = Participant::shared("Esh", "hi@esh.ph");
//! let doe = Participant::shared("Doe", "hi@doe.ph");
//! let scheduler = Scheduler::default();
//!
//! let start = Utc.with_ymd_and_hms(2021, 7, 8, 16, 0, 0).unwrap();
//! let mut sync = scheduler.meeting(vec![esh.clone(), doe.clone()], start, "sync").unwrap();
//! assert!(scheduler.book_meeting(&mut sync));
//!
//! // The same hour is now taken for both of them.
//! let mut again = scheduler.meeting(vec![doe.clone()], start, "again").unwrap();
//! assert!(!scheduler.book_meeting(&mut again));
//!
//! let next = scheduler.suggest_meeting_time(&again).unwrap();
//! assert_eq!(next.start(), Utc.with_ymd_and_hms(2021, 7, 8, 17, 0, 0).unwrap());
//! ```
//!
//! ## Modules
//!
//! - [`interval`] — Minute-resolution intervals and the conflict predicate
//! - [`ledger`] — A participant's sorted, append-only booked slots
//! - [`participant`] — Shared participant identity with a lock-guarded ledger
//! - [`meeting`] — Candidate meetings and their booking state
//! - [`scheduler`] — Atomic multi-party booking and slot suggestion
//! - [`conflict`] — Reports of which bookings block a candidate
//! - [`config`] — Meeting length and search bounds
//! - [`error`] — Error types

pub mod config;
pub mod conflict;
pub mod error;
pub mod interval;
pub mod ledger;
pub mod meeting;
pub mod participant;
pub mod scheduler;

pub use config::SchedulerConfig;
pub use conflict::{find_conflicts, Blocker, Conflict};
pub use error::BookingError;
pub use interval::Interval;
pub use ledger::{BookedSlot, Ledger};
pub use meeting::{Meeting, MeetingState};
pub use participant::{Participant, ParticipantId};
pub use scheduler::Scheduler;
