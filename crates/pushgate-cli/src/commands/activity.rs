use std::sync::Arc;

use chrono::{DateTime, Utc};
use clap::Subcommand;
use pushgate_core::storage::{Config, Database};
use pushgate_core::ActivityTracker;
use uuid::Uuid;

#[derive(Subcommand)]
pub enum ActivityAction {
    /// Record a liveness signal for a user
    Record {
        /// User identifier
        #[arg(long)]
        user: Uuid,
        /// Signal time (RFC 3339); defaults to now
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },
    /// Show the user's most recent activity record
    Last {
        /// User identifier
        #[arg(long)]
        user: Uuid,
    },
}

pub fn run(action: ActivityAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let store = Arc::new(Database::open()?);
    let tracker = ActivityTracker::new(store, config.timing);

    match action {
        ActivityAction::Record { user, at } => {
            let record = tracker.track(user, at.unwrap_or_else(Utc::now))?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        ActivityAction::Last { user } => match tracker.last_activity(user)? {
            Some(record) => println!("{}", serde_json::to_string_pretty(&record)?),
            None => println!("no activity recorded"),
        },
    }
    Ok(())
}
