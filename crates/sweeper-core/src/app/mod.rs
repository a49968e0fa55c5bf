//! App - アプリケーション層
//!
//! このモジュールは、ports を組み合わせてアプリケーションロジックを実装します。
//!
//! # 主要コンポーネント
//! - **SchedulerBuilder**: スケジューラの構築とワイヤリング
//! - **RetentionScheduler**: tick ごとの due 判定・削除・永続化
//! - **SchedulerStatus**: 状態スナップショット

pub mod builder;
pub mod scheduler;
pub mod status;

// 主要な型を再エクスポート
pub use self::builder::{BuildError, SchedulerBuilder};
pub use self::scheduler::RetentionScheduler;
pub use self::status::SchedulerStatus;
