//! TracingInterceptor - 評価呼び出しごとに span を張る

use std::time::Instant;

use tracing::{debug, info_span, warn};

use crate::ports::{DecisionInterceptor, DecisionInvocation, InvocationOutcome, Next};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingInterceptor;

impl DecisionInterceptor for TracingInterceptor {
    fn intercept(&self, invocation: &DecisionInvocation<'_>, next: Next<'_>) -> InvocationOutcome {
        let span = info_span!(
            "evaluate_decision",
            decision_id = %invocation.decision.id,
            decision_key = %invocation.decision.key,
            activity_id = invocation.activity_id.unwrap_or("-"),
        );
        let _guard = span.enter();

        let started = Instant::now();
        let outcome = next.proceed();
        let elapsed = started.elapsed();

        match outcome.result() {
            Ok(result) => debug!(matches = result.matches().len(), ?elapsed, "decision evaluated"),
            Err(err) => warn!(error = %err, ?elapsed, "decision evaluation failed"),
        }
        outcome
    }
}
