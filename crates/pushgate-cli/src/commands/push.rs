use std::sync::Arc;

use chrono::{DateTime, Utc};
use clap::Subcommand;
use pushgate_core::storage::{Config, Database};
use pushgate_core::{bucket_of, PushPolicy};
use serde::Serialize;
use uuid::Uuid;

#[derive(Subcommand)]
pub enum PushAction {
    /// Decide whether a push to the user would be well-timed
    Check {
        /// User identifier
        #[arg(long)]
        user: Uuid,
        /// Decision time (RFC 3339); defaults to now
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },
}

#[derive(Serialize)]
struct Decision {
    user: Uuid,
    at: DateTime<Utc>,
    bucket: u16,
    allow: bool,
}

pub fn run(action: PushAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let store = Arc::new(Database::open()?);
    let policy = PushPolicy::new(store, config.timing);

    match action {
        PushAction::Check { user, at } => {
            let at = at.unwrap_or_else(Utc::now);
            let allow = policy.allow_push(user, at)?;
            let decision = Decision {
                user,
                at,
                bucket: bucket_of(at),
                allow,
            };
            println!("{}", serde_json::to_string_pretty(&decision)?);
        }
    }
    Ok(())
}
