//! DecisionInterceptor port - 評価呼び出しのミドルウェア
//!
//! インターセプタは評価器の呼び出しを包み、観測・計測だけを行います。
//! 入力と出力の内容は変えられません:
//! - 入力: [`Next::proceed`] は引数を取らず、受け取った invocation をそのまま渡す
//! - 出力: [`InvocationOutcome`] は crate 外で生成できない
//! - `Next` は `proceed(self)` で消費されるので、評価器は高々 1 回しか呼ばれない

use std::sync::Arc;

use crate::domain::{DecisionDefinition, EvaluationContext, EvaluationError, EvaluationResult};
use crate::ports::DecisionEvaluator;

/// What is being evaluated.
#[derive(Debug, Clone, Copy)]
pub struct DecisionInvocation<'a> {
    pub decision: &'a DecisionDefinition,
    pub context: &'a EvaluationContext,
    /// `None` for standalone evaluation.
    pub activity_id: Option<&'a str>,
}

/// The result of the innermost evaluator call, passed back out unchanged.
#[derive(Debug)]
pub struct InvocationOutcome(Result<EvaluationResult, EvaluationError>);

impl InvocationOutcome {
    pub(crate) fn into_result(self) -> Result<EvaluationResult, EvaluationError> {
        self.0
    }

    pub fn result(&self) -> Result<&EvaluationResult, &EvaluationError> {
        self.0.as_ref()
    }

    pub fn is_ok(&self) -> bool {
        self.0.is_ok()
    }
}

/// The rest of the chain.
pub struct Next<'a> {
    invocation: DecisionInvocation<'a>,
    rest: &'a [Arc<dyn DecisionInterceptor>],
    evaluator: &'a dyn DecisionEvaluator,
}

impl<'a> Next<'a> {
    pub(crate) fn new(
        invocation: DecisionInvocation<'a>,
        rest: &'a [Arc<dyn DecisionInterceptor>],
        evaluator: &'a dyn DecisionEvaluator,
    ) -> Self {
        Self {
            invocation,
            rest,
            evaluator,
        }
    }

    /// Run the remaining interceptors and finally the evaluator.
    pub fn proceed(self) -> InvocationOutcome {
        match self.rest.split_first() {
            Some((head, tail)) => {
                let next = Next::new(self.invocation, tail, self.evaluator);
                head.intercept(&self.invocation, next)
            }
            None => InvocationOutcome(
                self.evaluator
                    .evaluate(self.invocation.decision, self.invocation.context),
            ),
        }
    }
}

/// DecisionInterceptor は評価呼び出しを包む
///
/// ```ignore
/// struct Timing;
///
/// impl DecisionInterceptor for Timing {
///     fn intercept(&self, invocation: &DecisionInvocation<'_>, next: Next<'_>) -> InvocationOutcome {
///         let started = std::time::Instant::now();
///         let outcome = next.proceed();
///         tracing::debug!(decision = %invocation.decision.key, elapsed = ?started.elapsed());
///         outcome
///     }
/// }
/// ```
pub trait DecisionInterceptor: Send + Sync {
    fn intercept(&self, invocation: &DecisionInvocation<'_>, next: Next<'_>) -> InvocationOutcome;
}
