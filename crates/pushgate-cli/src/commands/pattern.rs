use std::sync::Arc;

use chrono::{DateTime, Utc};
use clap::Subcommand;
use pushgate_core::storage::{Config, Database};
use pushgate_core::PushPolicy;
use uuid::Uuid;

#[derive(Subcommand)]
pub enum PatternAction {
    /// Compute and show the user's recurring windows (bypasses the cache)
    Show {
        /// User identifier
        #[arg(long)]
        user: Uuid,
        /// Reference time for the lookback (RFC 3339); defaults to now
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },
}

pub fn run(action: PatternAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let store = Arc::new(Database::open()?);
    let policy = PushPolicy::new(store, config.timing);

    match action {
        PatternAction::Show { user, at } => {
            let profile = policy.compute_profile(user, at.unwrap_or_else(Utc::now))?;
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
    }
    Ok(())
}
