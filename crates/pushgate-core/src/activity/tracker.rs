//! Folds raw liveness signals into coarse continuous-activity intervals.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::debug;
use uuid::Uuid;

use crate::activity::ActivityRecord;
use crate::error::Result;
use crate::storage::{ActivityStore, TimingConfig};

/// Records "user is active" signals against the activity history.
///
/// Invoked on every liveness signal, independent of push delivery; expected
/// to be cheap and idempotent within the continuity window.
pub struct ActivityTracker {
    store: Arc<dyn ActivityStore>,
    config: TimingConfig,
}

impl ActivityTracker {
    pub fn new(store: Arc<dyn ActivityStore>, config: TimingConfig) -> Self {
        Self { store, config }
    }

    /// Record a liveness signal for `user_id` observed at `now`.
    ///
    /// Extends the open record when the newest one finished within the
    /// continuity window of `now`, otherwise opens a fresh record with
    /// `started_at == finished_at == now`. Repeated signals inside the window
    /// keep advancing the same record.
    pub fn track(&self, user_id: Uuid, now: DateTime<Utc>) -> Result<ActivityRecord> {
        let cutoff = now - self.config.continuity_window();
        if let Some(mut open) = self.store.find_last_within(user_id, cutoff)? {
            open.finished_at = now;
            self.store.update(&open)?;
            debug!("extended activity record {} for user {user_id}", open.id);
            return Ok(open);
        }

        let record = self.store.insert(user_id, now)?;
        debug!("opened activity record {} for user {user_id}", record.id);
        Ok(record)
    }

    /// Newest activity record for `user_id`, or `None` for unseen users.
    pub fn last_activity(&self, user_id: Uuid) -> Result<Option<ActivityRecord>> {
        Ok(self.store.find_last(user_id)?)
    }
}
