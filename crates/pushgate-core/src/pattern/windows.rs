//! Fixed 3-hour windows of the day and their aggregation from buckets.

use std::collections::BTreeMap;

use serde::Serialize;

/// One fixed 3-hour span of the day, as an inclusive bucket-ID range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DaySpan {
    pub label: &'static str,
    pub from: u16,
    pub to: u16,
}

/// The 8 fixed 3-hour spans covering the full day.
///
/// Bucket IDs are 1-based, so the first span starts at bucket 1 rather than
/// an unreachable bucket 0.
pub const DAY_SPANS: [DaySpan; 8] = [
    DaySpan { label: "00-03", from: 1, to: 12 },
    DaySpan { label: "03-06", from: 13, to: 24 },
    DaySpan { label: "06-09", from: 25, to: 36 },
    DaySpan { label: "09-12", from: 37, to: 48 },
    DaySpan { label: "12-15", from: 49, to: 60 },
    DaySpan { label: "15-18", from: 61, to: 72 },
    DaySpan { label: "18-21", from: 73, to: 84 },
    DaySpan { label: "21-24", from: 85, to: 96 },
];

/// A 3-hour span of the day with observed activity in it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecurringWindow {
    pub span: DaySpan,
    /// Bucket IDs inside the span that saw any activity, ascending.
    pub member_buckets: Vec<u16>,
    /// Total observed duration across the member buckets, in seconds.
    pub total_secs: i64,
    /// Median member bucket; the single representative instant used by the
    /// decision policy.
    pub median_bucket: u16,
}

/// Median bucket ID: the middle element of the sorted list, or the floored
/// integer mean of the two middle elements for even lengths.
pub fn median(buckets: &[u16]) -> u16 {
    let mut sorted = buckets.to_vec();
    sorted.sort_unstable();

    let len = sorted.len();
    if len == 0 {
        return 0;
    }
    if len % 2 == 0 {
        (sorted[len / 2 - 1] + sorted[len / 2]) / 2
    } else {
        sorted[len / 2]
    }
}

/// Fold accumulated buckets into the fixed day spans and keep the strongest.
///
/// Spans with no member buckets are dropped; the rest are ranked by total
/// duration, ties going to the earlier span, and truncated to `max_windows`.
pub fn assemble_windows(buckets: &BTreeMap<u16, i64>, max_windows: usize) -> Vec<RecurringWindow> {
    let mut windows = Vec::new();

    for span in DAY_SPANS {
        let member_buckets: Vec<u16> = buckets.range(span.from..=span.to).map(|(id, _)| *id).collect();
        if member_buckets.is_empty() {
            continue;
        }

        let total_secs = buckets.range(span.from..=span.to).map(|(_, secs)| *secs).sum();
        let median_bucket = median(&member_buckets);
        windows.push(RecurringWindow {
            span,
            member_buckets,
            total_secs,
            median_bucket,
        });
    }

    windows.sort_by(|a, b| {
        b.total_secs
            .cmp(&a.total_secs)
            .then_with(|| a.span.from.cmp(&b.span.from))
    });
    windows.truncate(max_windows);
    windows
}
