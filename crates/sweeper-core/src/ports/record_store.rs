//! RecordStore port - 期限切れレコードを削除するストレージ
//!
//! スケジューラが知っているのは「閾値以前のレコードを消す」という
//! 1 つの操作だけです。クエリや保存形式は実装側の責務です。

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::StoreError;

/// RecordStore は保存済みレコードの削除を担当
///
/// # 契約
/// - timestamp が `threshold` 以前（`<=`）のレコードをすべて削除し、件数を返す
/// - `threshold == now` でも安全に呼べる
/// - 冪等: 同じ閾値で 2 回呼んでも 2 回目は 0 件で `Ok`
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn delete_older_than(&self, threshold: DateTime<Utc>) -> Result<u64, StoreError>;
}
