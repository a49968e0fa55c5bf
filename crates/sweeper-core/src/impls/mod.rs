//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **InMemorySettingsStore**: テスト用の設定ストア
//! - **JsonFileSettingsStore**: 再起動を跨ぐ設定ストア（JSON ファイル）
//! - **InMemoryRecordStore**: 開発・テスト用のレコードストア
//!
//! 本番のレコードストア（SQLite など）はホスト側で `RecordStore` を実装します。

pub mod inmem_records;
pub mod inmem_settings;
pub mod json_file_settings;

// 主要な型を再エクスポート
pub use self::inmem_records::{InMemoryRecordStore, StoredRecord};
pub use self::inmem_settings::InMemorySettingsStore;
pub use self::json_file_settings::JsonFileSettingsStore;
