//! InMemorySettingsStore - テスト用の設定ストア
//!
//! # 学習ポイント
//! - プロセス内でのみ有効（再起動で消える）
//! - 読み書きの失敗を注入できる（スケジューラのエラー経路のテスト用）

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::ports::{SettingsStore, StoreError};

/// InMemorySettingsStore は HashMap を Mutex で包んだだけのストア
///
/// clone したものは同じ中身を共有します。複数のスケジューラが同じ
/// namespace を見ている状況の再現にも使えます。
#[derive(Debug, Clone, Default)]
pub struct InMemorySettingsStore {
    values: Arc<Mutex<HashMap<String, i64>>>,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
    writes: Arc<AtomicUsize>,
}

impl InMemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 初期値入りで作成
    pub fn with_value(key: impl Into<String>, value: i64) -> Self {
        let mut values = HashMap::new();
        values.insert(key.into(), value);
        Self {
            values: Arc::new(Mutex::new(values)),
            ..Self::default()
        }
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// 成功した `put_i64` の回数
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// 失敗注入を無視して現在値を覗く
    pub async fn peek(&self, key: &str) -> Option<i64> {
        self.values.lock().await.get(key).copied()
    }
}

#[async_trait]
impl SettingsStore for InMemorySettingsStore {
    async fn get_i64(&self, key: &str, fallback: i64) -> Result<i64, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(format!("read of {key} rejected")));
        }
        let values = self.values.lock().await;
        Ok(values.get(key).copied().unwrap_or(fallback))
    }

    async fn put_i64(&self, key: &str, value: i64) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(format!("write of {key} rejected")));
        }
        self.values.lock().await.insert(key.to_string(), value);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_key_returns_fallback() {
        let store = InMemorySettingsStore::new();
        assert_eq!(store.get_i64("last_cleanup", 42).await.unwrap(), 42);
    }

    #[tokio::test]
    async fn put_then_get() {
        let store = InMemorySettingsStore::new();
        store.put_i64("last_cleanup", 7).await.unwrap();
        assert_eq!(store.get_i64("last_cleanup", 0).await.unwrap(), 7);
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn injected_failures() {
        let store = InMemorySettingsStore::with_value("last_cleanup", 1);
        store.fail_reads(true);
        store.fail_writes(true);

        assert!(store.get_i64("last_cleanup", 0).await.is_err());
        assert!(store.put_i64("last_cleanup", 2).await.is_err());
        assert_eq!(store.peek("last_cleanup").await, Some(1));
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn clones_share_values() {
        let a = InMemorySettingsStore::new();
        let b = a.clone();
        a.put_i64("k", 5).await.unwrap();
        assert_eq!(b.get_i64("k", 0).await.unwrap(), 5);
    }
}
