//! FixtureEvaluator - 決められた結果を返す評価器
//!
//! 実際のルール評価はこの crate の範囲外です。開発・テスト・CLI では
//! 決定定義 id ごとに用意した結果（または失敗）を返します。

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::domain::{DecisionDefinition, EvaluationContext, EvaluationError, EvaluationResult};
use crate::ports::DecisionEvaluator;

#[derive(Debug, Default)]
pub struct FixtureEvaluator {
    fixtures: HashMap<String, Result<EvaluationResult, String>>,
    calls: Mutex<Vec<(String, EvaluationContext)>>,
}

impl FixtureEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `result` whenever decision `decision_id` is evaluated.
    pub fn with_result(mut self, decision_id: impl Into<String>, result: EvaluationResult) -> Self {
        self.fixtures.insert(decision_id.into(), Ok(result));
        self
    }

    /// Fail every evaluation of `decision_id` with `message`.
    pub fn with_failure(mut self, decision_id: impl Into<String>, message: impl Into<String>) -> Self {
        self.fixtures.insert(decision_id.into(), Err(message.into()));
        self
    }

    /// Decision ids and contexts seen so far, in call order.
    pub fn calls(&self) -> Vec<(String, EvaluationContext)> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl DecisionEvaluator for FixtureEvaluator {
    fn evaluate(
        &self,
        decision: &DecisionDefinition,
        context: &EvaluationContext,
    ) -> Result<EvaluationResult, EvaluationError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((decision.id.clone(), context.clone()));

        match self.fixtures.get(&decision.id) {
            Some(Ok(result)) => Ok(result.clone()),
            Some(Err(message)) => Err(EvaluationError::new(&decision.id, message.clone())),
            None => Err(EvaluationError::new(
                &decision.id,
                "no fixture registered for this decision",
            )),
        }
    }
}
