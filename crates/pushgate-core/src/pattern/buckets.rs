//! Time-of-day bucketing of activity records.

use std::collections::BTreeMap;

use chrono::{DateTime, Timelike, Utc};

use crate::activity::ActivityRecord;

/// Seconds covered by one bucket.
pub const BUCKET_SECS: i64 = 15 * 60;

/// Buckets in a day; IDs run 1..=96.
pub const BUCKETS_PER_DAY: u16 = 96;

/// 15-minute time-of-day slot for `instant`, independent of calendar date.
///
/// IDs are 1-based: 00:00-00:15 is bucket 1, 09:00-09:15 is bucket 37,
/// 23:45-24:00 is bucket 96. Signals on different days at the same time of
/// day land in the same bucket, which is what makes recurring daily patterns
/// visible.
pub fn bucket_of(instant: DateTime<Utc>) -> u16 {
    (instant.hour() * 4 + instant.minute() / 15 + 1) as u16
}

fn bucket_of_secs(unix_secs: i64) -> u16 {
    (unix_secs.rem_euclid(86_400) / BUCKET_SECS + 1) as u16
}

/// Distribute each record's span over the time-of-day buckets it touches.
///
/// Each span is walked in steps aligned to 15-minute wall-clock boundaries;
/// a step's overlap with the record is credited to the bucket at the step's
/// start, and the last partial step is clipped to the record's end. A record
/// whose start and end coincide still registers its start bucket, with zero
/// duration. Durations are reported in seconds.
pub fn accumulate_buckets(records: &[ActivityRecord]) -> BTreeMap<u16, i64> {
    let mut buckets = BTreeMap::new();
    for record in records {
        let end = record.finished_at.timestamp();
        let mut cursor = record.started_at.timestamp();
        loop {
            let step_end = (cursor.div_euclid(BUCKET_SECS) + 1) * BUCKET_SECS;
            let portion = step_end.min(end) - cursor;
            *buckets.entry(bucket_of_secs(cursor)).or_insert(0) += portion;
            if step_end >= end {
                break;
            }
            cursor = step_end;
        }
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn record(start: DateTime<Utc>, finish: DateTime<Utc>) -> ActivityRecord {
        ActivityRecord {
            id: 0,
            user_id: Uuid::new_v4(),
            started_at: start,
            finished_at: finish,
        }
    }

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, h, m, 0).unwrap()
    }

    #[test]
    fn bucket_of_covers_the_day() {
        assert_eq!(bucket_of(at(0, 0)), 1);
        assert_eq!(bucket_of(at(0, 14)), 1);
        assert_eq!(bucket_of(at(0, 15)), 2);
        assert_eq!(bucket_of(at(9, 0)), 37);
        assert_eq!(bucket_of(at(12, 0)), 49);
        assert_eq!(bucket_of(at(23, 45)), 96);
        assert_eq!(bucket_of(at(23, 59)), 96);
    }

    #[test]
    fn aligned_span_fills_one_bucket() {
        let buckets = accumulate_buckets(&[record(at(9, 0), at(9, 15))]);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[&37], 900);
    }

    #[test]
    fn unaligned_span_splits_across_buckets() {
        let buckets = accumulate_buckets(&[record(at(9, 5), at(9, 20))]);
        assert_eq!(buckets[&37], 600);
        assert_eq!(buckets[&38], 300);
    }

    #[test]
    fn span_crossing_several_boundaries_is_clipped_at_both_ends() {
        let buckets = accumulate_buckets(&[record(at(8, 50), at(9, 35))]);
        assert_eq!(buckets[&36], 600);
        assert_eq!(buckets[&37], 900);
        assert_eq!(buckets[&38], 900);
        assert_eq!(buckets[&39], 300);
        assert_eq!(buckets.len(), 4);
    }

    #[test]
    fn zero_length_record_registers_its_bucket() {
        let buckets = accumulate_buckets(&[record(at(9, 7), at(9, 7))]);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[&37], 0);
    }

    #[test]
    fn same_time_of_day_accumulates_across_days() {
        let monday = record(at(9, 0), at(9, 15));
        let tuesday = record(
            Utc.with_ymd_and_hms(2026, 3, 11, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 3, 11, 9, 15, 0).unwrap(),
        );
        let buckets = accumulate_buckets(&[monday, tuesday]);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[&37], 1800);
    }

    #[test]
    fn span_crossing_midnight_wraps_bucket_ids() {
        let buckets = accumulate_buckets(&[record(
            at(23, 50),
            Utc.with_ymd_and_hms(2026, 3, 11, 0, 10, 0).unwrap(),
        )]);
        assert_eq!(buckets[&96], 600);
        assert_eq!(buckets[&1], 600);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Bucketing redistributes a record's span without losing or
            /// inventing time.
            #[test]
            fn total_duration_is_conserved(
                start_offset in 0i64..86_400 * 40,
                duration in 0i64..86_400 * 2,
            ) {
                let base = 1_767_225_600i64; // 2026-01-01T00:00:00Z
                let start = DateTime::from_timestamp(base + start_offset, 0).unwrap();
                let finish = start + chrono::Duration::seconds(duration);

                let buckets = accumulate_buckets(&[record(start, finish)]);
                let total: i64 = buckets.values().sum();
                prop_assert_eq!(total, duration);
            }

            /// Every produced bucket ID is a valid time-of-day slot.
            #[test]
            fn bucket_ids_stay_in_range(
                start_offset in 0i64..86_400 * 40,
                duration in 0i64..86_400 * 2,
            ) {
                let base = 1_767_225_600i64;
                let start = DateTime::from_timestamp(base + start_offset, 0).unwrap();
                let finish = start + chrono::Duration::seconds(duration);

                let buckets = accumulate_buckets(&[record(start, finish)]);
                for id in buckets.keys() {
                    prop_assert!((1..=BUCKETS_PER_DAY).contains(id));
                }
            }
        }
    }
}
