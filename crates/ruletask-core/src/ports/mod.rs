//! Ports - 抽象化レイヤー
//!
//! Hexagonal Architecture の「ポート」を定義します。
//! 決定評価器・定義リポジトリ・履歴ストア・変数スコープなど、
//! この crate の外側にある協調者へのインターフェースです。

pub mod clock;
pub mod decision_resolver;
pub mod evaluator;
pub mod event_sink;
pub mod id_generator;
pub mod interceptor;
pub mod variable_scope;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::decision_resolver::DecisionDefinitionResolver;
pub use self::evaluator::DecisionEvaluator;
pub use self::event_sink::HistorySink;
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::interceptor::{DecisionInterceptor, DecisionInvocation, InvocationOutcome, Next};
pub use self::variable_scope::VariableScope;
