//! Ports - 抽象化レイヤー
//!
//! このモジュールは Hexagonal Architecture の「ポート」を定義します。
//! スケジューラは以下 3 つの外部コラボレータにだけ依存します。
//!
//! - **Clock**: 現在時刻
//! - **SettingsStore**: 最終 cleanup 時刻の永続化
//! - **RecordStore**: 閾値以前のレコード削除

pub mod clock;
pub mod record_store;
pub mod settings_store;

// 主要な trait を再エクスポート
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::record_store::RecordStore;
pub use self::settings_store::{DEFAULT_LAST_CLEANUP_KEY, DEFAULT_PREFERENCES_NAME, SettingsStore};
pub use crate::domain::StoreError;
