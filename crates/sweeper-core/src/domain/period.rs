//! Retention period: the only knob the host exposes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How long records are kept before they become eligible for deletion.
///
/// Serialized as snake_case (`one_hour`, `one_day`, ...) so config files
/// stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetentionPeriod {
    Unlimited,
    OneHour,
    OneDay,
    #[default]
    OneWeek,
}

impl RetentionPeriod {
    pub const ALL: [RetentionPeriod; 4] = [
        RetentionPeriod::Unlimited,
        RetentionPeriod::OneHour,
        RetentionPeriod::OneDay,
        RetentionPeriod::OneWeek,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RetentionPeriod::Unlimited => "unlimited",
            RetentionPeriod::OneHour => "one_hour",
            RetentionPeriod::OneDay => "one_day",
            RetentionPeriod::OneWeek => "one_week",
        }
    }
}

impl fmt::Display for RetentionPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown period name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown retention period: {0:?} (expected one of unlimited, one_hour, one_day, one_week)")]
pub struct ParsePeriodError(pub String);

impl FromStr for RetentionPeriod {
    type Err = ParsePeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RetentionPeriod::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ParsePeriodError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_snake_case() {
        let s = serde_json::to_string(&RetentionPeriod::OneHour).unwrap();
        assert_eq!(s, "\"one_hour\"");

        let back: RetentionPeriod = serde_json::from_str("\"one_week\"").unwrap();
        assert_eq!(back, RetentionPeriod::OneWeek);
    }

    #[test]
    fn parses_display_names() {
        for period in RetentionPeriod::ALL {
            assert_eq!(period.to_string().parse::<RetentionPeriod>(), Ok(period));
        }
    }

    #[test]
    fn rejects_unknown_name() {
        let err = "forever".parse::<RetentionPeriod>().unwrap_err();
        assert_eq!(err, ParsePeriodError("forever".to_string()));
    }
}
