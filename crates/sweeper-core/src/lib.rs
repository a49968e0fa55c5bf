//! sweeper-core
//!
//! 時間ベースのデータ保持（retention）スケジューラ。
//!
//! ホストは高頻度のイベント（ネットワーク呼び出しなど）ごとに
//! `RetentionScheduler::tick` を呼び、スケジューラは必要なときだけ
//! 古いレコードを削除します。
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（period, policy, outcome, errors）
//! - **ports**: 抽象化レイヤー（Clock, SettingsStore, RecordStore）
//! - **app**: アプリケーションロジック（builder, scheduler, status）
//! - **impls**: ports の実装（InMemory, JSON ファイル）
//! - **config**: 設定の読み込み

pub mod app;
pub mod config;
pub mod domain;
pub mod impls;
pub mod ports;

pub use app::{BuildError, RetentionScheduler, SchedulerBuilder, SchedulerStatus};
pub use config::{ConfigError, RetentionConfig};
pub use domain::{
    CleanupReport, ErrorKind, RetentionError, RetentionPeriod, RetentionPolicy, StoreError,
    TickOutcome,
};
