//! SchedulerBuilder - スケジューラの構築とワイヤリング
//!
//! # 学習ポイント
//! - Builder パターンの実装
//! - 起動時検証（Fail-fast 設計）
//! - Clock は省略可（SystemClock）、ストアは必須

use std::sync::Arc;

use crate::config::{ConfigError, RetentionConfig};
use crate::domain::RetentionPolicy;
use crate::ports::{Clock, RecordStore, SettingsStore, SystemClock};

use super::scheduler::RetentionScheduler;

/// SchedulerBuilder は RetentionScheduler を構築
///
/// # 使用例
/// ```ignore
/// let scheduler = SchedulerBuilder::new(RetentionConfig::with_period(RetentionPeriod::OneDay))
///     .settings(Arc::new(JsonFileSettingsStore::new(dir, "retention_preferences")))
///     .records(Arc::new(my_record_store))
///     .build()?;
/// ```
pub struct SchedulerBuilder {
    config: RetentionConfig,
    clock: Option<Arc<dyn Clock>>,
    settings: Option<Arc<dyn SettingsStore>>,
    records: Option<Arc<dyn RecordStore>>,
}

/// BuildError はスケジューラ構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("missing collaborator: {0}. Call SchedulerBuilder::{0}() before build().")]
    MissingCollaborator(&'static str),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SchedulerBuilder {
    pub fn new(config: RetentionConfig) -> Self {
        Self {
            config,
            clock: None,
            settings: None,
            records: None,
        }
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn settings(mut self, settings: Arc<dyn SettingsStore>) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn records(mut self, records: Arc<dyn RecordStore>) -> Self {
        self.records = Some(records);
        self
    }

    /// # 検証
    /// - config が妥当か
    /// - settings / records が設定されているか
    pub fn build(self) -> Result<RetentionScheduler, BuildError> {
        self.config.validate()?;
        let settings = self
            .settings
            .ok_or(BuildError::MissingCollaborator("settings"))?;
        let records = self
            .records
            .ok_or(BuildError::MissingCollaborator("records"))?;
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));

        let policy = RetentionPolicy::new(self.config.period);
        if policy.is_unlimited() {
            tracing::warn!(
                "Retention period is unlimited; each due cleanup still deletes every record up to now"
            );
        }
        tracing::debug!(
            period = %policy.period(),
            cleanup_interval_secs = policy.cleanup_interval().num_seconds(),
            key = %self.config.last_cleanup_key,
            "Retention scheduler configured"
        );

        Ok(RetentionScheduler::new(
            policy,
            self.config.last_cleanup_key,
            clock,
            settings,
            records,
        ))
    }
}
