//! Storage: the activity-store contract, its SQLite implementation, and
//! TOML-based configuration.

mod config;
pub mod database;

pub use config::{Config, TimingConfig};
pub use database::Database;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::activity::ActivityRecord;
use crate::error::StoreError;

/// Append-only history of per-user activity intervals.
///
/// "No matching row" is an `Ok(None)` or empty-list outcome, never an error;
/// implementations reserve [`StoreError`] for real storage failures. Any
/// relational or document store can satisfy this contract.
pub trait ActivityStore: Send + Sync {
    /// Append a record with `started_at == finished_at == at` and return it
    /// with its assigned id.
    fn insert(&self, user_id: Uuid, at: DateTime<Utc>) -> Result<ActivityRecord, StoreError>;

    /// Persist an advanced `finished_at` for an existing record.
    fn update(&self, record: &ActivityRecord) -> Result<(), StoreError>;

    /// Newest record for the user whose `finished_at` is strictly after
    /// `cutoff`.
    fn find_last_within(
        &self,
        user_id: Uuid,
        cutoff: DateTime<Utc>,
    ) -> Result<Option<ActivityRecord>, StoreError>;

    /// Newest record for the user by `finished_at`.
    fn find_last(&self, user_id: Uuid) -> Result<Option<ActivityRecord>, StoreError>;

    /// All records for the user with `started_at >= since`, ascending by
    /// `started_at`.
    fn find_all_since(
        &self,
        user_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<Vec<ActivityRecord>, StoreError>;
}

/// Returns `~/.config/pushgate[-dev]/` based on PUSHGATE_ENV.
///
/// Set PUSHGATE_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("PUSHGATE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("pushgate-dev")
    } else {
        base_dir.join("pushgate")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
