//! SettingsStore port - プロセス再起動を跨いで残る key-value ストア
//!
//! スケジューラは最後に cleanup を実行した時刻（epoch ミリ秒）を
//! 1 つの key に保存するだけです。
//!
//! # 実装
//! - **InMemorySettingsStore**: テスト用
//! - **JsonFileSettingsStore**: namespace ごとに 1 つの JSON ファイル

use async_trait::async_trait;

use crate::domain::StoreError;

/// 設定ストアの namespace 識別子のデフォルト
pub const DEFAULT_PREFERENCES_NAME: &str = "retention_preferences";

/// 最終 cleanup 時刻を保存する key のデフォルト
pub const DEFAULT_LAST_CLEANUP_KEY: &str = "last_cleanup";

/// SettingsStore は整数値を永続化する
///
/// # 契約
/// - `get_i64` は key が無ければ `fallback` を返す（エラーではない）
/// - `put_i64` が `Ok` を返したら、その値は再起動後も読める
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get_i64(&self, key: &str, fallback: i64) -> Result<i64, StoreError>;

    async fn put_i64(&self, key: &str, value: i64) -> Result<(), StoreError>;
}
