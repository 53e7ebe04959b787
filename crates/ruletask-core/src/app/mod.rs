//! App - アプリケーション層
//!
//! このモジュールは、ports を組み合わせて業務タスクの実行を実装します。
//!
//! # 主要コンポーネント
//! - **EngineBuilder**: 協調者のワイヤリングと起動時検証
//! - **DecisionTask**: 配置時に検証済みのタスク設定
//! - **DecisionInvoker**: 解決 → 評価 → 履歴 → マッピング のオーケストレーション
//! - **InterceptorChain**: 評価器呼び出しを包むミドルウェア
//! - **HistoryEventProducer**: 監査レコードの構築
//! - **DecisionService**: プロセス外の単独評価

pub mod builder;
pub mod decision_service;
pub mod history_producer;
pub mod interceptor_chain;
pub mod invoker;
pub mod task;

// 主要な型を再エクスポート
pub use self::builder::{BuildError, DecisionEngine, EngineBuilder};
pub use self::decision_service::DecisionService;
pub use self::history_producer::{HistoryEventProducer, NumericAggregate};
pub use self::interceptor_chain::InterceptorChain;
pub use self::invoker::DecisionInvoker;
pub use self::task::{DecisionTask, ResultMapping, StepCompletion};
