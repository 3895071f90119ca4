//! Push decision policy: is now a good moment to push to this user?

use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::debug;
use serde::Serialize;
use uuid::Uuid;

use crate::cache::TtlCache;
use crate::error::Result;
use crate::pattern::{accumulate_buckets, assemble_windows, bucket_of, RecurringWindow};
use crate::storage::{ActivityStore, TimingConfig};

/// Per-user outcome of the recurring-window computation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ActivityProfile {
    /// No records inside the lookback window. Insufficient data, not
    /// "inactive": such users are never blocked from receiving pushes.
    NoHistory,
    /// Top recurring windows ranked by observed duration.
    Windows(Vec<RecurringWindow>),
}

/// Decides whether a candidate push should be sent now or deferred.
///
/// The policy is a pure function of stored history plus the current instant,
/// modulo the per-user profile cache it owns. One policy value is constructed
/// per service instance; the cache is process-local and never shared across
/// instances.
pub struct PushPolicy {
    store: Arc<dyn ActivityStore>,
    cache: TtlCache<Uuid, ActivityProfile>,
    config: TimingConfig,
}

impl PushPolicy {
    pub fn new(store: Arc<dyn ActivityStore>, config: TimingConfig) -> Self {
        Self {
            store,
            cache: TtlCache::new(),
            config,
        }
    }

    /// Decide whether `user_id` should receive a push at `now`.
    ///
    /// A recently-active user is always an acceptable target; the recency
    /// check reads the store directly and is therefore always fresh. Beyond
    /// that the decision compares `now`'s bucket against the median bucket of
    /// each cached recurring window, failing open when no pattern is known.
    pub fn allow_push(&self, user_id: Uuid, now: DateTime<Utc>) -> Result<bool> {
        if let Some(last) = self.store.find_last(user_id)? {
            if now - last.finished_at < self.config.recency_window() {
                debug!(
                    "user {user_id} was active {}s ago, allowing push",
                    (now - last.finished_at).num_seconds()
                );
                return Ok(true);
            }
        }

        let profile = self.activity_profile(user_id, now)?;
        let windows = match &profile {
            ActivityProfile::NoHistory => return Ok(true),
            ActivityProfile::Windows(windows) if windows.is_empty() => return Ok(true),
            ActivityProfile::Windows(windows) => windows,
        };

        let bucket = bucket_of(now);
        Ok(windows.iter().any(|w| w.median_bucket == bucket))
    }

    /// Cached recurring-window profile for `user_id`.
    ///
    /// A cache miss triggers the full lookback scan; the result is cached for
    /// the configured TTL, so the scan runs at most once per user per TTL
    /// period under steady load.
    pub fn activity_profile(&self, user_id: Uuid, now: DateTime<Utc>) -> Result<ActivityProfile> {
        if let Some(profile) = self.cache.get(&user_id) {
            return Ok(profile);
        }

        let profile = self.compute_profile(user_id, now)?;
        self.cache
            .set(user_id, profile.clone(), self.config.profile_ttl());
        Ok(profile)
    }

    /// Full lookback scan and window aggregation, bypassing the cache.
    pub fn compute_profile(&self, user_id: Uuid, now: DateTime<Utc>) -> Result<ActivityProfile> {
        let since = now - self.config.lookback_window();
        let records = self.store.find_all_since(user_id, since)?;
        if records.is_empty() {
            return Ok(ActivityProfile::NoHistory);
        }

        let buckets = accumulate_buckets(&records);
        let windows = assemble_windows(&buckets, self.config.max_windows);
        debug!(
            "computed {} recurring windows for user {user_id} from {} records",
            windows.len(),
            records.len()
        );
        Ok(ActivityProfile::Windows(windows))
    }
}
