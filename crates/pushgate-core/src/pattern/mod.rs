//! Recurring daily activity pattern detection.
//!
//! The trailing weeks of a user's activity history are distributed over
//! 15-minute time-of-day buckets, then folded into 8 fixed 3-hour windows of
//! the day. The strongest windows, each represented by the median of its
//! member buckets, describe when the user habitually shows up.

mod buckets;
mod windows;

pub use buckets::{accumulate_buckets, bucket_of, BUCKETS_PER_DAY, BUCKET_SECS};
pub use windows::{assemble_windows, median, DaySpan, RecurringWindow, DAY_SPANS};
