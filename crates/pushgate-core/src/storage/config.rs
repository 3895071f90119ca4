//! TOML-based engine configuration.
//!
//! Stores the timing tunables for activity tracking and push decisions.
//! Configuration is stored at `~/.config/pushgate/config.toml`.

use std::path::PathBuf;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::ConfigError;

/// Timing tunables for the activity tracker and the push decision policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Largest gap, in minutes, that still extends the open activity record.
    #[serde(default = "default_continuity_minutes")]
    pub continuity_minutes: u32,
    /// Days of history the window aggregation reads.
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,
    /// Minutes since last activity within which a push is always allowed.
    #[serde(default = "default_recency_minutes")]
    pub recency_minutes: u32,
    /// Minutes a computed activity profile stays cached per user.
    #[serde(default = "default_profile_ttl_minutes")]
    pub profile_ttl_minutes: u32,
    /// Recurring windows retained per user.
    #[serde(default = "default_max_windows")]
    pub max_windows: usize,
}

// Default functions
fn default_continuity_minutes() -> u32 {
    15
}
fn default_lookback_days() -> u32 {
    30
}
fn default_recency_minutes() -> u32 {
    60
}
fn default_profile_ttl_minutes() -> u32 {
    180
}
fn default_max_windows() -> usize {
    2
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            continuity_minutes: default_continuity_minutes(),
            lookback_days: default_lookback_days(),
            recency_minutes: default_recency_minutes(),
            profile_ttl_minutes: default_profile_ttl_minutes(),
            max_windows: default_max_windows(),
        }
    }
}

impl TimingConfig {
    pub fn continuity_window(&self) -> Duration {
        Duration::minutes(i64::from(self.continuity_minutes))
    }

    pub fn lookback_window(&self) -> Duration {
        Duration::days(i64::from(self.lookback_days))
    }

    pub fn recency_window(&self) -> Duration {
        Duration::minutes(i64::from(self.recency_minutes))
    }

    pub fn profile_ttl(&self) -> Duration {
        Duration::minutes(i64::from(self.profile_ttl_minutes))
    }
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/pushgate/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timing: TimingConfig,
}

impl Config {
    /// Path of the configuration file.
    pub fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|err| ConfigError::DataDir(err.to_string()))?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk, writing defaults on first use.
    ///
    /// # Errors
    /// Returns an error if an existing file cannot be parsed or the default
    /// file cannot be written.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                toml::from_str(&content).map_err(|err| ConfigError::ParseFailed(err.to_string()))
            }
            Err(_) => {
                let config = Self::default();
                config.save()?;
                Ok(config)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|err| ConfigError::SaveFailed {
            path: path.clone(),
            message: err.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|err| ConfigError::SaveFailed {
            path,
            message: err.to_string(),
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timing_values() {
        let config = TimingConfig::default();
        assert_eq!(config.continuity_minutes, 15);
        assert_eq!(config.lookback_days, 30);
        assert_eq!(config.recency_minutes, 60);
        assert_eq!(config.profile_ttl_minutes, 180);
        assert_eq!(config.max_windows, 2);

        assert_eq!(config.continuity_window(), Duration::minutes(15));
        assert_eq!(config.lookback_window(), Duration::days(30));
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: Config = toml::from_str(
            "[timing]\n\
             recency_minutes = 90\n",
        )
        .unwrap();
        assert_eq!(config.timing.recency_minutes, 90);
        assert_eq!(config.timing.continuity_minutes, 15);
        assert_eq!(config.timing.max_windows, 2);
    }

    #[test]
    fn toml_round_trip_preserves_values() {
        let mut config = Config::default();
        config.timing.lookback_days = 14;

        let content = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&content).unwrap();
        assert_eq!(parsed.timing.lookback_days, 14);
    }
}
