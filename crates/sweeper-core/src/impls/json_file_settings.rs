//! JsonFileSettingsStore - namespace ごとに 1 つの JSON ファイルを持つ設定ストア
//!
//! `<dir>/<name>.json` に `{"last_cleanup": 1704110400000}` のような
//! オブジェクトを保存します。
//!
//! # 実装詳細
//! - 書き込みは一時ファイル + rename（途中で落ちても旧ファイルが残る）
//! - read-modify-write はプロセス内で Mutex により直列化
//! - 壊れたファイルへの書き込みは空の状態から作り直す（読み込みはエラーのまま）
//! - プロセス間の排他は行わない

use std::collections::BTreeMap;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::ports::{SettingsStore, StoreError};

type Values = BTreeMap<String, i64>;

pub struct JsonFileSettingsStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileSettingsStore {
    /// `dir` 配下の `<name>.json` を使うストアを作成（ファイルは遅延作成）
    pub fn new(dir: impl AsRef<Path>, name: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{name}.json")),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Values, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(Values::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == IoErrorKind::NotFound => Ok(Values::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, values: &Values) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(values)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl SettingsStore for JsonFileSettingsStore {
    async fn get_i64(&self, key: &str, fallback: i64) -> Result<i64, StoreError> {
        let _guard = self.lock.lock().await;
        let values = self.load().await?;
        Ok(values.get(key).copied().unwrap_or(fallback))
    }

    async fn put_i64(&self, key: &str, value: i64) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut values = match self.load().await {
            Ok(values) => values,
            Err(StoreError::Serde(e)) => {
                tracing::warn!(
                    error = %e,
                    path = %self.path.display(),
                    "Settings file is corrupted, rewriting it from scratch"
                );
                Values::new()
            }
            Err(e) => return Err(e),
        };
        values.insert(key.to_string(), value);
        self.save(&values).await
    }
}
