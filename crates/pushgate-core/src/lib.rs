//! # Pushgate Core Library
//!
//! This library decides, for a given user and a given moment, whether a push
//! notification should be sent now or deferred until a better time, based on
//! that user's historical activity pattern. The surrounding delivery pipeline
//! treats a "no" as "retry later", never as a permanent rejection.
//!
//! ## Architecture
//!
//! - **Activity tracking**: raw liveness signals are folded into coarse
//!   continuous-activity intervals, persisted as an append-only history
//! - **Pattern detection**: the trailing 30 days of history are distributed
//!   over 15-minute time-of-day buckets and aggregated into 8 fixed 3-hour
//!   windows, ranked by total observed duration
//! - **Decision policy**: a recently-active short-circuit plus median-bucket
//!   matching against the user's top recurring windows, memoized per user in
//!   a TTL cache
//! - **Storage**: SQLite-backed activity history and TOML-based configuration
//!
//! ## Key Components
//!
//! - [`ActivityTracker`]: merges liveness signals into activity records
//! - [`PushPolicy`]: cached go/no-go decision for a candidate push
//! - [`TtlCache`]: per-key memoization with explicit expiry
//! - [`Database`]: activity history persistence

pub mod activity;
pub mod cache;
pub mod error;
pub mod pattern;
pub mod policy;
pub mod storage;

pub use activity::{ActivityRecord, ActivityTracker};
pub use cache::TtlCache;
pub use error::{ConfigError, EngineError, Result, StoreError};
pub use pattern::{bucket_of, DaySpan, RecurringWindow};
pub use policy::{ActivityProfile, PushPolicy};
pub use storage::{ActivityStore, Config, Database, TimingConfig};
