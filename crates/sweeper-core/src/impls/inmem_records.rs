//! InMemoryRecordStore - 開発・テスト用のレコードストア
//!
//! # 学習ポイント
//! - `<=` threshold のレコードを retain で落とす
//! - 呼ばれた閾値を記録しておき、テストで「何回・どの閾値で」消したかを検証する
//! - 失敗注入で DeletionFailure の経路を再現する

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::ports::{RecordStore, StoreError};

/// StoredRecord は timestamp 付きの 1 レコード
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRecord {
    pub id: u64,
    pub recorded_at: DateTime<Utc>,
    pub payload: String,
}

#[derive(Debug, Default)]
struct State {
    records: Vec<StoredRecord>,
    next_id: u64,
    deletions: Vec<DateTime<Utc>>,
}

/// InMemoryRecordStore は Vec<StoredRecord> を Mutex で包んだストア
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordStore {
    state: Arc<Mutex<State>>,
    fail_deletes: Arc<AtomicBool>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// レコードを追加して id を返す
    pub async fn insert(&self, recorded_at: DateTime<Utc>, payload: impl Into<String>) -> u64 {
        let mut state = self.state.lock().await;
        state.next_id += 1;
        let id = state.next_id;
        state.records.push(StoredRecord {
            id,
            recorded_at,
            payload: payload.into(),
        });
        id
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn records(&self) -> Vec<StoredRecord> {
        self.state.lock().await.records.clone()
    }

    /// `delete_older_than` に渡された閾値（失敗した呼び出しも含む）
    pub async fn deletions(&self) -> Vec<DateTime<Utc>> {
        self.state.lock().await.deletions.clone()
    }

    pub fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn delete_older_than(&self, threshold: DateTime<Utc>) -> Result<u64, StoreError> {
        let mut state = self.state.lock().await;
        state.deletions.push(threshold);

        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("record store is locked".to_string()));
        }

        let before = state.records.len();
        state.records.retain(|r| r.recorded_at > threshold);
        Ok((before - state.records.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn deletes_at_or_before_threshold() {
        let store = InMemoryRecordStore::new();
        store.insert(t0() - Duration::hours(2), "old").await;
        store.insert(t0(), "edge").await;
        let keep = store.insert(t0() + Duration::seconds(1), "new").await;

        let deleted = store.delete_older_than(t0()).await.unwrap();
        assert_eq!(deleted, 2);

        let left = store.records().await;
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].id, keep);
    }

    #[tokio::test]
    async fn repeated_delete_is_noop() {
        let store = InMemoryRecordStore::new();
        store.insert(t0() - Duration::hours(1), "old").await;

        assert_eq!(store.delete_older_than(t0()).await.unwrap(), 1);
        assert_eq!(store.delete_older_than(t0()).await.unwrap(), 0);
        assert_eq!(store.deletions().await, vec![t0(), t0()]);
    }

    #[tokio::test]
    async fn failing_delete_keeps_records() {
        let store = InMemoryRecordStore::new();
        store.insert(t0() - Duration::hours(1), "old").await;
        store.fail_deletes(true);

        assert!(store.delete_older_than(t0()).await.is_err());
        assert_eq!(store.len().await, 1);
    }
}
