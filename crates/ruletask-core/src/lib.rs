//! ruletask-core
//!
//! Business-rule task support for a process engine: invoke a decision,
//! keep the raw result as a transient variable, map it into a persistent
//! process variable and record an audit event of the evaluation.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（value, decision, result, history, spec, variables, errors）
//! - **ports**: 抽象化レイヤー（DecisionEvaluator, DecisionDefinitionResolver, HistorySink, VariableScope, など）
//! - **mapping**: 結果マッパー（singleEntry, singleResult, collectValues, resultList）
//! - **app**: アプリケーションロジック（builder, invoker, interceptor_chain, history_producer, decision_service）
//! - **impls**: 実装（ExecutionFrame, InMemoryDecisionRepository など開発用）

pub mod domain;
pub mod ports;
pub mod mapping;
pub mod app;
pub mod impls;

#[cfg(test)]
mod test_support;
