//! Tick outcome: what a single `tick` did.
//!
//! The scheduler itself never logs to the user; hosts inspect the outcome (or
//! the error) and decide what to surface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of a completed cleanup pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupReport {
    /// Instant the pass ran at; becomes the new last-cleanup time.
    pub ran_at: DateTime<Utc>,

    /// Records at or before this instant were deleted.
    pub threshold: DateTime<Utc>,

    /// Number of records the record store reported as deleted.
    pub deleted: u64,
}

/// What a tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TickOutcome {
    /// Cleanup interval has not elapsed yet. Nothing was touched.
    NotDue { next_due_after: DateTime<Utc> },

    /// A cleanup pass ran and its timestamp was persisted.
    Cleaned(CleanupReport),
}

impl TickOutcome {
    pub fn is_cleaned(&self) -> bool {
        matches!(self, TickOutcome::Cleaned(_))
    }

    pub fn report(&self) -> Option<&CleanupReport> {
        match self {
            TickOutcome::Cleaned(report) => Some(report),
            TickOutcome::NotDue { .. } => None,
        }
    }
}
