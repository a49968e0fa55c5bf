//! RetentionScheduler - 期限切れレコード削除の要否判定と実行
//!
//! ホストはネットワーク呼び出しのたびに `tick` を呼びます。ほとんどの tick は
//! 「まだ due ではない」で即座に返り、I/O は発生しません。
//!
//! # フロー（due の場合）
//! 1. Mutex を取得（due 判定・削除・永続化を直列化）
//! 2. last_cleanup_at を取得（初回のみ SettingsStore から読み込み）
//! 3. RecordStore::delete_older_than(threshold)
//! 4. SettingsStore::put_i64(key, now)
//! 5. メモリ上の last_cleanup_at を now に進める
//!
//! 3 か 4 が失敗した場合は 5 を行わず、次に due になった tick で全体をやり直します。

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::domain::{CleanupReport, RetentionError, RetentionPolicy, TickOutcome};
use crate::ports::{Clock, RecordStore, SettingsStore};

use super::status::SchedulerStatus;

/// Mutex で守られる可変状態
#[derive(Debug, Default)]
struct SchedulerState {
    /// None = まだ SettingsStore から読み込んでいない
    last_cleanup_at: Option<DateTime<Utc>>,
}

/// RetentionScheduler は cleanup の頻度を制御する
///
/// # 並行性
/// - 内部スレッドやタイマーは持たない（呼び出し元のタスク上で同期的に動く）
/// - 同時に来た tick は Mutex で待たされ、取得後に due を再評価する
/// - プロセス間の排他は行わない（同じ namespace を共有すると多めに削除されうる）
pub struct RetentionScheduler {
    policy: RetentionPolicy,
    last_cleanup_key: String,
    clock: Arc<dyn Clock>,
    settings: Arc<dyn SettingsStore>,
    records: Arc<dyn RecordStore>,
    state: Mutex<SchedulerState>,
}

impl RetentionScheduler {
    /// 通常は `SchedulerBuilder` 経由で作成する
    pub fn new(
        policy: RetentionPolicy,
        last_cleanup_key: impl Into<String>,
        clock: Arc<dyn Clock>,
        settings: Arc<dyn SettingsStore>,
        records: Arc<dyn RecordStore>,
    ) -> Self {
        Self {
            policy,
            last_cleanup_key: last_cleanup_key.into(),
            clock,
            settings,
            records,
            state: Mutex::new(SchedulerState::default()),
        }
    }

    pub fn policy(&self) -> &RetentionPolicy {
        &self.policy
    }

    /// 注入された Clock の現在時刻で tick
    pub async fn tick_now(&self) -> Result<TickOutcome, RetentionError> {
        let now = self.clock.now();
        self.tick(now).await
    }

    /// cleanup が due なら実行する
    ///
    /// # Errors
    /// - `RetentionError::Deletion`: RecordStore の削除に失敗
    /// - `RetentionError::StorageWrite`: 最終 cleanup 時刻の永続化に失敗
    ///
    /// どちらの場合も last_cleanup_at は進まない。
    pub async fn tick(&self, now: DateTime<Utc>) -> Result<TickOutcome, RetentionError> {
        let mut state = self.state.lock().await;

        let last_cleanup_at = match state.last_cleanup_at {
            Some(at) => at,
            None => {
                let at = self.hydrate(now).await;
                state.last_cleanup_at = Some(at);
                at
            }
        };

        if !self.policy.is_due(last_cleanup_at, now) {
            if now < last_cleanup_at {
                tracing::debug!(
                    now = %now,
                    last_cleanup_at = %last_cleanup_at,
                    "Clock went backwards, treating cleanup as not due"
                );
            }
            return Ok(TickOutcome::NotDue {
                next_due_after: self.policy.next_due_after(last_cleanup_at),
            });
        }

        let threshold = self.policy.threshold(now);
        tracing::info!(
            period = %self.policy.period(),
            threshold = %threshold,
            last_cleanup_at = %last_cleanup_at,
            "Performing data retention maintenance"
        );

        let deleted = self
            .records
            .delete_older_than(threshold)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, threshold = %threshold, "Retention cleanup failed");
                RetentionError::Deletion(e)
            })?;

        self.settings
            .put_i64(&self.last_cleanup_key, now.timestamp_millis())
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    key = %self.last_cleanup_key,
                    "Failed to persist last cleanup time"
                );
                RetentionError::StorageWrite(e)
            })?;

        state.last_cleanup_at = Some(now);

        if deleted > 0 {
            tracing::info!(deleted, threshold = %threshold, "Retention cleanup complete");
        } else {
            tracing::debug!(threshold = %threshold, "Retention cleanup complete, nothing to delete");
        }

        Ok(TickOutcome::Cleaned(CleanupReport {
            ran_at: now,
            threshold,
            deleted,
        }))
    }

    /// 現在のスナップショット（読み込み前なら last_cleanup_at は None）
    pub async fn status(&self) -> SchedulerStatus {
        let state = self.state.lock().await;
        SchedulerStatus::new(&self.policy, state.last_cleanup_at)
    }

    /// SettingsStore から last_cleanup_at を読む
    ///
    /// 値が無い・壊れている・読めない場合は `now` にフォールバックする。
    /// 新規インストールの最初の tick で削除が走らないのはこのため。
    async fn hydrate(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let fallback = now.timestamp_millis();
        match self.settings.get_i64(&self.last_cleanup_key, fallback).await {
            Ok(millis) => DateTime::from_timestamp_millis(millis).unwrap_or_else(|| {
                tracing::warn!(
                    key = %self.last_cleanup_key,
                    value = millis,
                    "Stored last cleanup time is out of range, falling back to now"
                );
                now
            }),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    key = %self.last_cleanup_key,
                    "Failed to read last cleanup time, falling back to now"
                );
                now
            }
        }
    }
}
