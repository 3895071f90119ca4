//! End-to-end tests for the push timing decision flow.
//!
//! These tests drive the tracker and policy together over a real SQLite
//! store, the way a liveness-signal handler and a notification pipeline
//! would.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use pushgate_core::{
    ActivityProfile, ActivityTracker, Database, PushPolicy, TimingConfig,
};
use uuid::Uuid;

fn open_database(dir: &tempfile::TempDir) -> Arc<Database> {
    Arc::new(Database::open_at(&dir.path().join("pushgate.db")).unwrap())
}

fn day(d: u32, h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, d, h, m, 0).unwrap()
}

#[test]
fn morning_habit_gates_pushes_to_the_morning() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_database(&dir);
    let config = TimingConfig::default();
    let tracker = ActivityTracker::new(store.clone(), config.clone());
    let policy = PushPolicy::new(store, config);

    let user = Uuid::new_v4();

    // Five days of signals every ten minutes between 09:00 and 09:30; each
    // day's burst merges into a single record.
    for d in 1..=5 {
        for minute in [0, 10, 20, 30] {
            tracker.track(user, day(d, 9, minute)).unwrap();
        }
    }

    // The recorder produced one interval per day.
    match policy.compute_profile(user, day(6, 8, 0)).unwrap() {
        ActivityProfile::Windows(windows) => {
            assert_eq!(windows.len(), 1);
            assert_eq!(windows[0].span.label, "09-12");
            assert_eq!(windows[0].member_buckets, vec![37, 38]);
            assert_eq!(windows[0].total_secs, 5 * 30 * 60);
            assert_eq!(windows[0].median_bucket, 37);
        }
        ActivityProfile::NoHistory => panic!("expected a computed profile"),
    }

    // Next day, long after the last signal: only the median bucket opens the
    // gate.
    assert!(policy.allow_push(user, day(6, 9, 5)).unwrap());
    assert!(!policy.allow_push(user, day(6, 11, 0)).unwrap());
    assert!(!policy.allow_push(user, day(6, 3, 0)).unwrap());
}

#[test]
fn unknown_user_is_never_blocked() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_database(&dir);
    let policy = PushPolicy::new(store, TimingConfig::default());

    let user = Uuid::new_v4();
    assert!(policy.allow_push(user, day(1, 3, 0)).unwrap());
    assert!(policy.allow_push(user, day(1, 18, 45)).unwrap());
}

#[test]
fn recent_activity_overrides_the_pattern() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_database(&dir);
    let config = TimingConfig::default();
    let tracker = ActivityTracker::new(store.clone(), config.clone());
    let policy = PushPolicy::new(store, config);

    let user = Uuid::new_v4();
    for d in 1..=5 {
        tracker.track(user, day(d, 9, 0)).unwrap();
    }

    // A signal five minutes before the check, at a time of day the pattern
    // would reject.
    tracker.track(user, day(6, 2, 55)).unwrap();
    assert!(policy.allow_push(user, day(6, 3, 0)).unwrap());
}

#[test]
fn decisions_reuse_the_cached_profile() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_database(&dir);
    let config = TimingConfig::default();
    let tracker = ActivityTracker::new(store.clone(), config.clone());
    let policy = PushPolicy::new(store, config);

    let user = Uuid::new_v4();
    for d in 1..=3 {
        tracker.track(user, day(d, 9, 0)).unwrap();
    }

    // First decision caches the profile; a record added afterwards is not
    // visible to pattern matching until the cache expires...
    assert!(policy.allow_push(user, day(4, 9, 5)).unwrap());
    tracker.track(user, day(4, 21, 0)).unwrap();
    assert!(!policy.allow_push(user, day(5, 21, 0)).unwrap());

    // ...but the recency short-circuit reads the store directly and stays
    // fresh.
    assert!(policy.allow_push(user, day(4, 21, 30)).unwrap());
}
