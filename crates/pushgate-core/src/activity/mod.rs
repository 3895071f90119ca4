//! Activity history: continuous-presence intervals per user.

mod tracker;

pub use tracker::ActivityTracker;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One continuous-presence interval for one user.
///
/// `finished_at` keeps advancing while liveness signals arrive within the
/// continuity window; `started_at` never changes after insertion. Records are
/// append-only: they are never deleted and never merged retroactively, and
/// only the newest record for a user is still eligible for extension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub id: i64,
    pub user_id: Uuid,
    pub started_at: DateTime<Utc>,
    /// Last-seen time within this interval; `finished_at >= started_at`.
    pub finished_at: DateTime<Utc>,
}
