//! Tests for interval construction, truncation and shifting.

use booking_engine::interval::truncate_to_minute;
use booking_engine::{BookingError, Interval};
use chrono::{DateTime, Duration, TimeZone, Utc};

#[test]
fn construction_truncates_to_whole_minutes() {
    let start = Utc.with_ymd_and_hms(2021, 7, 8, 16, 0, 42).unwrap() + Duration::milliseconds(250);
    let end = Utc.with_ymd_and_hms(2021, 7, 8, 17, 0, 59).unwrap();

    let interval = Interval::new(start, end).unwrap();

    assert_eq!(interval.start(), Utc.with_ymd_and_hms(2021, 7, 8, 16, 0, 0).unwrap());
    assert_eq!(interval.end(), Utc.with_ymd_and_hms(2021, 7, 8, 17, 0, 0).unwrap());
    assert_eq!(interval.duration_minutes(), 60);
}

#[test]
fn start_equal_to_end_is_rejected() {
    let at = Utc.with_ymd_and_hms(2021, 7, 8, 16, 0, 0).unwrap();
    let err = Interval::new(at, at).unwrap_err();
    assert!(matches!(err, BookingError::Validation(_)));
}

#[test]
fn start_after_end_is_rejected() {
    let start = Utc.with_ymd_and_hms(2021, 7, 8, 17, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2021, 7, 8, 16, 0, 0).unwrap();
    assert!(matches!(
        Interval::new(start, end),
        Err(BookingError::Validation(_))
    ));
}

#[test]
fn reversed_interval_inside_a_booking_is_rejected() {
    let start = Utc.with_ymd_and_hms(2021, 7, 8, 16, 59, 30).unwrap();
    let end = Utc.with_ymd_and_hms(2021, 7, 8, 16, 0, 0).unwrap();
    let err = Interval::new(start, end).unwrap_err();
    assert!(matches!(err, BookingError::Validation(_)));
}

#[test]
fn sub_minute_interval_collapses_and_is_rejected() {
    // 16:00:10 - 16:00:50 truncates to 16:00 - 16:00
    let start = Utc.with_ymd_and_hms(2021, 7, 8, 16, 0, 10).unwrap();
    let end = Utc.with_ymd_and_hms(2021, 7, 8, 16, 0, 50).unwrap();
    assert!(Interval::new(start, end).is_err());
}

#[test]
fn starting_at_derives_end_from_duration() {
    let start = Utc.with_ymd_and_hms(2021, 7, 9, 16, 30, 15).unwrap();
    let interval = Interval::starting_at(start, Duration::hours(1)).unwrap();

    assert_eq!(interval.start(), Utc.with_ymd_and_hms(2021, 7, 9, 16, 30, 0).unwrap());
    assert_eq!(interval.end(), Utc.with_ymd_and_hms(2021, 7, 9, 17, 30, 0).unwrap());
}

#[test]
fn starting_at_rejects_non_positive_duration() {
    let start = Utc.with_ymd_and_hms(2021, 7, 9, 16, 0, 0).unwrap();
    assert!(Interval::starting_at(start, Duration::zero()).is_err());
    assert!(Interval::starting_at(start, Duration::minutes(-30)).is_err());
    assert!(Interval::starting_at(start, Duration::seconds(30)).is_err());
}

#[test]
fn shifted_preserves_duration() {
    let start = Utc.with_ymd_and_hms(2021, 7, 9, 16, 0, 0).unwrap();
    let interval = Interval::starting_at(start, Duration::hours(1)).unwrap();

    let moved = interval.shifted(Duration::minutes(30)).unwrap();

    assert_eq!(moved.start(), Utc.with_ymd_and_hms(2021, 7, 9, 16, 30, 0).unwrap());
    assert_eq!(moved.end(), Utc.with_ymd_and_hms(2021, 7, 9, 17, 30, 0).unwrap());
    assert_eq!(moved.duration_minutes(), interval.duration_minutes());
}

#[test]
fn starting_at_past_last_instant_is_rejected() {
    let result = Interval::starting_at(DateTime::<Utc>::MAX_UTC, Duration::hours(1));
    assert!(matches!(result, Err(BookingError::Validation(_))));
}

#[test]
fn starting_at_with_huge_duration_is_rejected() {
    let start = Utc.with_ymd_and_hms(2021, 7, 9, 16, 0, 0).unwrap();
    let result = Interval::starting_at(start, Duration::days(400_000 * 366));
    assert!(matches!(result, Err(BookingError::Validation(_))));
}

#[test]
fn shifted_past_last_instant_is_none() {
    let last = truncate_to_minute(DateTime::<Utc>::MAX_UTC);
    let interval = Interval::starting_at(last - Duration::hours(1), Duration::hours(1)).unwrap();

    assert_eq!(interval.end(), last);
    assert!(interval.shifted(Duration::minutes(30)).is_none());
    assert!(interval.shifted(Duration::minutes(-30)).is_some());
}

#[test]
fn truncate_to_minute_is_idempotent() {
    let at = Utc.with_ymd_and_hms(2021, 7, 9, 16, 12, 34).unwrap() + Duration::microseconds(5);
    let once = truncate_to_minute(at);
    assert_eq!(once, Utc.with_ymd_and_hms(2021, 7, 9, 16, 12, 0).unwrap());
    assert_eq!(truncate_to_minute(once), once);
}

#[test]
fn display_is_minute_precision() {
    let start = Utc.with_ymd_and_hms(2021, 7, 9, 17, 0, 0).unwrap();
    let interval = Interval::starting_at(start, Duration::hours(1)).unwrap();
    assert_eq!(interval.to_string(), "2021-07-09 17:00 - 2021-07-09 18:00");
}

#[test]
fn serializes_as_rfc3339_pair() {
    let start = Utc.with_ymd_and_hms(2021, 7, 9, 17, 0, 0).unwrap();
    let interval = Interval::starting_at(start, Duration::hours(1)).unwrap();

    let json = serde_json::to_value(interval).unwrap();

    assert_eq!(json["start"], "2021-07-09T17:00:00Z");
    assert_eq!(json["end"], "2021-07-09T18:00:00Z");
}
