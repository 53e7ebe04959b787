//! DecisionEvaluator port - 決定テーブル評価器
//!
//! ルールのマッチング方法はこの crate の関心外です。
//! 評価器は構造化された [`EvaluationResult`] を返すだけです。

use crate::domain::{DecisionDefinition, EvaluationContext, EvaluationError, EvaluationResult};

/// DecisionEvaluator は 1 つの決定を評価
///
/// 呼び出しはブロックしてもよい（I/O 境界）が、
/// この crate 側では suspend しません。
pub trait DecisionEvaluator: Send + Sync {
    fn evaluate(
        &self,
        decision: &DecisionDefinition,
        context: &EvaluationContext,
    ) -> Result<EvaluationResult, EvaluationError>;
}
