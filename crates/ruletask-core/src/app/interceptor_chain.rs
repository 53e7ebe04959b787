//! InterceptorChain - 評価器呼び出しを包むミドルウェアの列
//!
//! 登録順に外側から内側へ実行され、最内側が評価器そのもの。

use std::sync::Arc;

use crate::domain::{EvaluationError, EvaluationResult};
use crate::ports::{DecisionEvaluator, DecisionInterceptor, DecisionInvocation, Next};

#[derive(Clone, Default)]
pub struct InterceptorChain {
    interceptors: Vec<Arc<dyn DecisionInterceptor>>,
}

impl InterceptorChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an interceptor; it runs inside all previously added ones.
    pub fn push(&mut self, interceptor: Arc<dyn DecisionInterceptor>) {
        self.interceptors.push(interceptor);
    }

    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    pub fn invoke(
        &self,
        evaluator: &dyn DecisionEvaluator,
        invocation: DecisionInvocation<'_>,
    ) -> Result<EvaluationResult, EvaluationError> {
        Next::new(invocation, &self.interceptors, evaluator)
            .proceed()
            .into_result()
    }
}
