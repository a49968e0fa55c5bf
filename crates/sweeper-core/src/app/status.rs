//! Status - スケジューラの状態スナップショット
//!
//! ホストのデバッグ画面やログ出力向け。取得しても SettingsStore は読まない。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{RetentionPeriod, RetentionPolicy};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerStatus {
    pub period: RetentionPeriod,
    pub retention_secs: i64,
    pub cleanup_interval_secs: i64,

    /// まだ一度も tick されていなければ None
    pub last_cleanup_at: Option<DateTime<Utc>>,

    pub next_due_after: Option<DateTime<Utc>>,
}

impl SchedulerStatus {
    pub(crate) fn new(policy: &RetentionPolicy, last_cleanup_at: Option<DateTime<Utc>>) -> Self {
        Self {
            period: policy.period(),
            retention_secs: policy.retention().num_seconds(),
            cleanup_interval_secs: policy.cleanup_interval().num_seconds(),
            last_cleanup_at,
            next_due_after: last_cleanup_at.map(|at| policy.next_due_after(at)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn status_before_first_tick() {
        let policy = RetentionPolicy::new(RetentionPeriod::OneWeek);
        let status = SchedulerStatus::new(&policy, None);
        assert_eq!(status.retention_secs, 7 * 24 * 3600);
        assert_eq!(status.cleanup_interval_secs, 2 * 3600);
        assert!(status.next_due_after.is_none());
    }

    #[test]
    fn status_after_hydration() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let policy = RetentionPolicy::new(RetentionPeriod::OneHour);
        let status = SchedulerStatus::new(&policy, Some(at));
        assert_eq!(status.next_due_after, Some(at + Duration::minutes(30)));

        let v = serde_json::to_value(&status).unwrap();
        assert_eq!(v["period"], "one_hour");
    }
}
