//! DecisionService - プロセス外での単独評価
//!
//! 業務タスクと同じインターセプタ列・同じ履歴ビルダーを通りますが、
//! 変数スコープへの書き込みはなく、履歴イベントに相関情報は付きません。

use std::sync::Arc;

use tracing::{debug, info_span};

use crate::domain::{DecisionReference, DecisionTaskError, EvaluationContext, EvaluationResult};

use super::invoker::DecisionInvoker;

#[derive(Clone)]
pub struct DecisionService {
    invoker: Arc<DecisionInvoker>,
}

impl DecisionService {
    pub(crate) fn new(invoker: Arc<DecisionInvoker>) -> Self {
        Self { invoker }
    }

    /// Evaluate `reference` against `variables` and return the raw result.
    ///
    /// `Deployment` binding never resolves here since there is no calling
    /// process.
    pub fn evaluate_decision(
        &self,
        reference: &DecisionReference,
        variables: EvaluationContext,
    ) -> Result<EvaluationResult, DecisionTaskError> {
        let span = info_span!("standalone_decision", decision_key = %reference.key);
        let _guard = span.enter();

        let decision = self.invoker.resolver.resolve(reference, None)?;
        let result = self.invoker.evaluate(&decision, &variables, None)?;
        let event_id = self.invoker.record_history(&decision, &result, None)?;
        debug!(decision_id = %decision.id, event_id = ?event_id, "standalone evaluation done");
        Ok(result)
    }
}
