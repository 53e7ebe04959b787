//! Impls - 実装（開発用・テスト用）
//!
//! このモジュールには ports の実装を含めます。
//!
//! # 含まれる実装
//! - **ExecutionFrame**: VariableScope（transient / persistent / 変数履歴）
//! - **InMemoryDecisionRepository**: DecisionDefinitionResolver
//! - **FixtureEvaluator**: 結果を返すだけの DecisionEvaluator
//! - **LoggingHistorySink** / **InMemoryHistorySink**: HistorySink
//! - **TracingInterceptor**: 評価呼び出しの span
//!
//! # 本番用実装
//! 本番の評価器・定義ストア・履歴ストアはエンジン側で ports を実装します。

pub mod fixture_evaluator;
pub mod frame;
pub mod history_sink;
pub mod repository;
pub mod tracing_interceptor;

// 主要な型を再エクスポート
pub use self::fixture_evaluator::FixtureEvaluator;
pub use self::frame::{ExecutionFrame, FrameOutcome};
pub use self::history_sink::{InMemoryHistorySink, LoggingHistorySink};
pub use self::repository::{InMemoryDecisionRepository, RepositoryError};
pub use self::tracing_interceptor::TracingInterceptor;
