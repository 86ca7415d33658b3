//! Tests for per-participant availability, booking and appointment listing.

use booking_engine::{Interval, Ledger, Participant};
use chrono::{DateTime, Duration, TimeZone, Utc};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn at(s: &str) -> DateTime<Utc> {
    s.parse().unwrap()
}

fn hour_from(start: &str) -> Interval {
    Interval::starting_at(at(start), Duration::hours(1)).unwrap()
}

fn booked_at_four() -> Participant {
    let esh = Participant::new("Esh", "hi@esh.ph");
    esh.add_booking(hour_from("2021-07-08T16:00:00Z"), "");
    esh
}

// ── Availability ────────────────────────────────────────────────────────────

#[test]
fn next_hour_is_available() {
    let esh = booked_at_four();
    assert!(esh.is_available(&hour_from("2021-07-08T17:00:00Z")));
}

#[test]
fn previous_hour_is_available() {
    let esh = booked_at_four();
    assert!(esh.is_available(&hour_from("2021-07-08T15:00:00Z")));
}

#[test]
fn same_hour_is_unavailable() {
    let esh = booked_at_four();
    assert!(!esh.is_available(&hour_from("2021-07-08T16:00:00Z")));
}

#[test]
fn half_hour_overlap_is_unavailable() {
    let esh = booked_at_four();
    assert!(!esh.is_available(&hour_from("2021-07-08T16:30:00Z")));

    // 16:30-17:00, ending exactly where the booking ends
    let tail = Interval::new(at("2021-07-08T16:30:00Z"), at("2021-07-08T17:00:00Z")).unwrap();
    assert!(!esh.is_available(&tail));
}

#[test]
fn candidate_containing_a_booking_is_unavailable() {
    let esh = booked_at_four();
    let afternoon = Interval::new(at("2021-07-08T15:00:00Z"), at("2021-07-08T18:00:00Z")).unwrap();
    assert!(!esh.is_available(&afternoon));
}

#[test]
fn empty_ledger_is_always_available() {
    let doe = Participant::new("Doe", "hi@doe.ph");
    assert!(doe.is_available(&hour_from("2021-07-08T16:00:00Z")));
    assert_eq!(doe.booking_count(), 0);
}

#[test]
fn add_booking_does_not_check_conflicts() {
    let esh = booked_at_four();
    esh.add_booking(hour_from("2021-07-08T16:00:00Z"), "double");
    assert_eq!(esh.booking_count(), 2);
}

#[test]
fn identity_fields_are_kept() {
    let esh = Participant::new("Esh", "hi@esh.ph");
    let doe = Participant::new("Doe", "hi@doe.ph");

    assert_eq!(esh.name(), "Esh");
    assert_eq!(esh.contact(), "hi@esh.ph");
    assert_ne!(esh.id(), doe.id());
}

// ── Listing ─────────────────────────────────────────────────────────────────

#[test]
fn upcoming_only_filters_past_bookings() {
    let now = at("2021-07-08T12:00:00Z");
    let esh = Participant::new("Esh", "hi@esh.ph");
    esh.add_booking(hour_from("2021-07-08T12:00:00Z"), "Hey! long time no see!");
    esh.add_booking(hour_from("2021-07-07T16:00:00Z"), "Hey! let's reschedule");

    let upcoming = esh.list_appointments(true, now);
    let all = esh.list_appointments(false, now);

    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].label, "Hey! long time no see!");
    assert_eq!(all.len(), 2);
}

#[test]
fn upcoming_compares_against_now_truncated_to_minute() {
    // A booking at 12:00 is still upcoming at 12:00:45.
    let now = Utc.with_ymd_and_hms(2021, 7, 8, 12, 0, 45).unwrap();
    let esh = Participant::new("Esh", "hi@esh.ph");
    esh.add_booking(hour_from("2021-07-08T12:00:00Z"), "now");

    assert_eq!(esh.list_appointments(true, now).len(), 1);
}

#[test]
fn appointments_are_listed_by_start_time() {
    let now = at("2021-07-01T00:00:00Z");
    let esh = Participant::new("Esh", "hi@esh.ph");
    esh.add_booking(hour_from("2021-07-09T16:00:00Z"), "third");
    esh.add_booking(hour_from("2021-07-08T09:00:00Z"), "first");
    esh.add_booking(hour_from("2021-07-08T16:00:00Z"), "second");

    let labels: Vec<String> = esh
        .list_appointments(true, now)
        .into_iter()
        .map(|slot| slot.label)
        .collect();
    assert_eq!(labels, ["first", "second", "third"]);

    let all: Vec<String> = esh
        .list_appointments(false, now)
        .into_iter()
        .map(|slot| slot.label)
        .collect();
    assert_eq!(all, ["first", "second", "third"]);
}

#[test]
fn listing_returns_a_copy() {
    let now = at("2021-07-01T00:00:00Z");
    let esh = booked_at_four();

    let mut listed = esh.list_appointments(false, now);
    listed.clear();

    assert_eq!(esh.booking_count(), 1);
}

#[test]
fn ledger_keeps_identical_starts_in_insertion_order() {
    let mut ledger = Ledger::new();
    ledger.add_booking(hour_from("2021-07-08T16:00:00Z"), "a");
    ledger.add_booking(hour_from("2021-07-08T16:00:00Z"), "b");

    let labels: Vec<&str> = ledger.slots().iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, ["a", "b"]);
    assert_eq!(ledger.len(), 2);
    assert!(!ledger.is_empty());
}

#[test]
fn conflicts_name_the_blocking_slot() {
    let esh = booked_at_four();
    let conflicts = esh.conflicts(&hour_from("2021-07-08T16:30:00Z"));

    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].slot.interval, hour_from("2021-07-08T16:00:00Z"));
    assert_eq!(conflicts[0].overlap_minutes, 30);
}
