//! Errors - エラー型と分類
//!
//! - `StoreError`: ports（SettingsStore / RecordStore）の実装が返すエラー
//! - `RetentionError`: `RetentionScheduler::tick` が呼び出し元へ返すエラー
//!
//! 読み込み失敗（StorageReadFailure 相当）はスケジューラ内部で吸収されるため、
//! `RetentionError` には現れません。

use thiserror::Error;

/// ErrorKind は失敗の運用分類
///
/// - Transient: 次の tick で再試行すれば回復しうる
/// - Infrastructure: 永続化層の障害（ディスク、設定ストアなど）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transient,
    Infrastructure,
}

/// StoreError は外部ストアの失敗
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// RetentionError は tick の失敗
///
/// どちらの場合も last_cleanup_at は進めないため、次に due になった tick で
/// cleanup 全体がやり直されます。
#[derive(Debug, Error)]
pub enum RetentionError {
    #[error("deleting expired records failed: {0}")]
    Deletion(#[source] StoreError),

    #[error("persisting last cleanup time failed: {0}")]
    StorageWrite(#[source] StoreError),
}

impl RetentionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RetentionError::Deletion(StoreError::Unavailable(_)) => ErrorKind::Transient,
            RetentionError::Deletion(_) | RetentionError::StorageWrite(_) => {
                ErrorKind::Infrastructure
            }
        }
    }
}
