//! Retention policy: maps a period to an age limit and a cleanup cadence.
//!
//! Pure computation, no I/O. The scheduler asks it two questions on every
//! tick: how often may a cleanup run, and what is the deletion threshold now.

use chrono::{DateTime, Duration, Utc};

use super::period::RetentionPeriod;

/// Derived retention settings for one configured period.
///
/// Both durations are computed once at construction and never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    period: RetentionPeriod,

    /// Age beyond which records are deleted. Zero means "unlimited".
    retention: Duration,

    /// Minimum time between two cleanup passes.
    cleanup_interval: Duration,
}

impl RetentionPolicy {
    pub fn new(period: RetentionPeriod) -> Self {
        Self {
            period,
            retention: Self::duration_for(period),
            cleanup_interval: Self::cleanup_interval_for(period),
        }
    }

    /// Age limit for a period. `Unlimited` is the zero sentinel.
    pub fn duration_for(period: RetentionPeriod) -> Duration {
        match period {
            RetentionPeriod::OneHour => Duration::hours(1),
            RetentionPeriod::OneDay => Duration::days(1),
            RetentionPeriod::OneWeek => Duration::days(7),
            RetentionPeriod::Unlimited => Duration::zero(),
        }
    }

    /// Cleanup cadence for a period.
    ///
    /// Fixed table: the one-hour tier is pruned every 30 minutes, everything
    /// else every 2 hours. There is intentionally no way to override it.
    pub fn cleanup_interval_for(period: RetentionPeriod) -> Duration {
        match period {
            RetentionPeriod::OneHour => Duration::minutes(30),
            RetentionPeriod::OneDay | RetentionPeriod::OneWeek | RetentionPeriod::Unlimited => {
                Duration::hours(2)
            }
        }
    }

    /// Deletion threshold at `now`.
    ///
    /// Records at or before the returned instant are deleted. With a zero
    /// retention the threshold is `now` itself, which deletes everything
    /// recorded so far.
    pub fn threshold_at(now: DateTime<Utc>, retention: Duration) -> DateTime<Utc> {
        if retention.is_zero() {
            return now;
        }
        now.checked_sub_signed(retention)
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Threshold for this policy's retention at `now`.
    pub fn threshold(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        Self::threshold_at(now, self.retention)
    }

    /// A cleanup is due when strictly more than the cleanup interval has
    /// elapsed. A clock that went backwards yields a negative delta and
    /// therefore "not due".
    pub fn is_due(&self, last_cleanup_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(last_cleanup_at) > self.cleanup_interval
    }

    /// Earliest instant after which a cleanup becomes due.
    pub fn next_due_after(&self, last_cleanup_at: DateTime<Utc>) -> DateTime<Utc> {
        last_cleanup_at
            .checked_add_signed(self.cleanup_interval)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    pub fn period(&self) -> RetentionPeriod {
        self.period
    }

    pub fn retention(&self) -> Duration {
        self.retention
    }

    pub fn cleanup_interval(&self) -> Duration {
        self.cleanup_interval
    }

    pub fn is_unlimited(&self) -> bool {
        self.retention.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    #[rstest]
    #[case::unlimited(RetentionPeriod::Unlimited, Duration::zero())]
    #[case::one_hour(RetentionPeriod::OneHour, Duration::hours(1))]
    #[case::one_day(RetentionPeriod::OneDay, Duration::hours(24))]
    #[case::one_week(RetentionPeriod::OneWeek, Duration::days(7))]
    fn duration_table(#[case] period: RetentionPeriod, #[case] expected: Duration) {
        assert_eq!(RetentionPolicy::duration_for(period), expected);
    }

    #[rstest]
    #[case::one_hour(RetentionPeriod::OneHour, Duration::minutes(30))]
    #[case::one_day(RetentionPeriod::OneDay, Duration::hours(2))]
    #[case::one_week(RetentionPeriod::OneWeek, Duration::hours(2))]
    #[case::unlimited(RetentionPeriod::Unlimited, Duration::hours(2))]
    fn cleanup_interval_table(#[case] period: RetentionPeriod, #[case] expected: Duration) {
        assert_eq!(RetentionPolicy::cleanup_interval_for(period), expected);
    }

    #[test]
    fn shortest_tier_has_smallest_interval() {
        let shortest = RetentionPolicy::cleanup_interval_for(RetentionPeriod::OneHour);
        for period in [
            RetentionPeriod::OneDay,
            RetentionPeriod::OneWeek,
            RetentionPeriod::Unlimited,
        ] {
            assert!(shortest < RetentionPolicy::cleanup_interval_for(period));
        }
    }

    #[test]
    fn threshold_subtracts_retention() {
        let policy = RetentionPolicy::new(RetentionPeriod::OneDay);
        assert_eq!(policy.threshold(t0()), t0() - Duration::days(1));
    }

    #[test]
    fn unlimited_threshold_is_now() {
        let policy = RetentionPolicy::new(RetentionPeriod::Unlimited);
        assert!(policy.is_unlimited());
        assert_eq!(policy.threshold(t0()), t0());
    }

    #[test]
    fn threshold_saturates_at_min() {
        let threshold = RetentionPolicy::threshold_at(DateTime::<Utc>::MIN_UTC, Duration::days(7));
        assert_eq!(threshold, DateTime::<Utc>::MIN_UTC);
    }

    #[test]
    fn due_only_strictly_after_interval() {
        let policy = RetentionPolicy::new(RetentionPeriod::OneDay);
        assert!(!policy.is_due(t0(), t0() + Duration::hours(1)));
        assert!(!policy.is_due(t0(), t0() + Duration::hours(2)));
        assert!(policy.is_due(t0(), t0() + Duration::hours(2) + Duration::milliseconds(1)));
    }

    #[test]
    fn clock_regression_is_not_due() {
        let policy = RetentionPolicy::new(RetentionPeriod::OneHour);
        assert!(!policy.is_due(t0(), t0() - Duration::days(3)));
    }

    #[test]
    fn next_due_after_adds_interval() {
        let policy = RetentionPolicy::new(RetentionPeriod::OneHour);
        assert_eq!(policy.next_due_after(t0()), t0() + Duration::minutes(30));
    }
}
