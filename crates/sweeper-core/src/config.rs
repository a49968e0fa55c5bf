//! Retention configuration.
//!
//! # Example
//!
//! ```json
//! {
//!   "period": "one_day",
//!   "preferences_name": "retention_preferences",
//!   "last_cleanup_key": "last_cleanup"
//! }
//! ```
//!
//! Every field is optional. The cleanup interval is not configurable; it is
//! derived from `period`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::RetentionPeriod;
use crate::ports::{DEFAULT_LAST_CLEANUP_KEY, DEFAULT_PREFERENCES_NAME};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{0} must not be empty")]
    Empty(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetentionConfig {
    /// How long records are kept.
    /// Default: one_week
    #[serde(default)]
    pub period: RetentionPeriod,

    /// Identifier of the settings namespace holding scheduler state.
    /// Default: "retention_preferences"
    #[serde(default = "default_preferences_name")]
    pub preferences_name: String,

    /// Key under which the last cleanup time (epoch millis) is stored.
    /// Default: "last_cleanup"
    #[serde(default = "default_last_cleanup_key")]
    pub last_cleanup_key: String,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            period: RetentionPeriod::default(),
            preferences_name: default_preferences_name(),
            last_cleanup_key: default_last_cleanup_key(),
        }
    }
}

fn default_preferences_name() -> String {
    DEFAULT_PREFERENCES_NAME.to_string()
}

fn default_last_cleanup_key() -> String {
    DEFAULT_LAST_CLEANUP_KEY.to_string()
}

impl RetentionConfig {
    pub fn with_period(period: RetentionPeriod) -> Self {
        Self {
            period,
            ..Self::default()
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.preferences_name.trim().is_empty() {
            return Err(ConfigError::Empty("preferences_name"));
        }
        if self.last_cleanup_key.trim().is_empty() {
            return Err(ConfigError::Empty("last_cleanup_key"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() {
        let config = RetentionConfig::from_json_str("{}").unwrap();
        assert_eq!(config, RetentionConfig::default());
        assert_eq!(config.period, RetentionPeriod::OneWeek);
        assert_eq!(config.preferences_name, "retention_preferences");
        assert_eq!(config.last_cleanup_key, "last_cleanup");
    }

    #[test]
    fn parses_period() {
        let config = RetentionConfig::from_json_str(r#"{"period": "one_hour"}"#).unwrap();
        assert_eq!(config.period, RetentionPeriod::OneHour);
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = RetentionConfig::from_json_str(r#"{"cleanup_interval_minutes": 5}"#);
        assert!(matches!(err, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn rejects_empty_key() {
        let err = RetentionConfig::from_json_str(r#"{"last_cleanup_key": " "}"#);
        assert!(matches!(err, Err(ConfigError::Empty("last_cleanup_key"))));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("retention.json");
        std::fs::write(&path, r#"{"period": "unlimited", "preferences_name": "inspector_prefs"}"#).unwrap();

        let config = RetentionConfig::from_json_file(&path).unwrap();
        assert_eq!(config.period, RetentionPeriod::Unlimited);
        assert_eq!(config.preferences_name, "inspector_prefs");
    }
}
