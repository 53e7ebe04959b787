//! VariableScope port - 実行フレームの変数スコープ
//!
//! # 設計原則
//! - transient（フレームローカル、履歴に残らない）と persistent を別 map で保持
//! - 予約キーの判定は persistent 書き込み時の 1 回の比較だけ
//!
//! # 実装
//! - **ExecutionFrame**（impls）

use crate::domain::{EvaluationContext, ReservedNameError, TransientValue, TypedValue};

pub trait VariableScope {
    /// Persistent variable visible from this frame.
    fn read(&self, name: &str) -> Option<&TypedValue>;

    /// Transient value held by this frame only.
    fn read_transient(&self, name: &str) -> Option<&TransientValue>;

    /// Visible only within this frame; never inherited, never persisted.
    ///
    /// Transient and persistent names live side by side: a transient value
    /// does not shadow a persistent variable of the same name. `read` keeps
    /// returning the persistent one and `read_transient` the transient one,
    /// while `write_persistent` to that name fails from now on.
    fn write_transient_local(&mut self, name: &str, value: TransientValue);

    /// Ordinary durable write.
    ///
    /// Fails when `name` is currently held as a transient value in this
    /// frame.
    fn write_persistent(&mut self, name: &str, value: TypedValue) -> Result<(), ReservedNameError>;

    /// Snapshot handed to the evaluator.
    fn evaluation_context(&self) -> EvaluationContext;
}
