//! DecisionInvoker - business-rule task の実行
//!
//! # フロー
//! 1. DecisionDefinitionResolver で参照を解決
//! 2. 変数スコープから読み取り専用の EvaluationContext を作る
//! 3. InterceptorChain 経由で評価器を呼ぶ
//! 4. 履歴イベントを構築して HistorySink へ（マッピングの成否に関係なく）
//! 5. 生の結果を transient `decisionResult` に保存
//! 6. 結果変数があればマッパーで変換して persistent に保存
//! 7. output mapping を適用
//!
//! どの段階の失敗もそのまま呼び出し元へ返します（ローカルな回復・リトライなし）。

use std::sync::Arc;

use tracing::{debug, info, info_span, warn};

use crate::domain::{
    DECISION_RESULT_VARIABLE, DecisionDefinition, DecisionInstanceId, DecisionTaskError,
    EngineConfig, EvaluationContext, EvaluationError, EvaluationResult, ExecutionContext,
    MappedVariable, MappingError, TransientValue, TypedValue,
};
use crate::ports::{
    DecisionDefinitionResolver, DecisionEvaluator, DecisionInvocation, HistorySink, VariableScope,
};

use super::history_producer::HistoryEventProducer;
use super::interceptor_chain::InterceptorChain;
use super::task::{DecisionTask, StepCompletion};

/// Name reported in output-mapping failures.
const OUTPUT_MAPPING: &str = "outputMapping";

pub struct DecisionInvoker {
    pub(crate) evaluator: Arc<dyn DecisionEvaluator>,
    pub(crate) resolver: Arc<dyn DecisionDefinitionResolver>,
    pub(crate) interceptors: InterceptorChain,
    pub(crate) producer: HistoryEventProducer,
    pub(crate) sink: Arc<dyn HistorySink>,
    pub(crate) config: EngineConfig,
}

impl DecisionInvoker {
    /// Execute one business-rule task step against `scope`.
    pub fn invoke(
        &self,
        task: &DecisionTask,
        scope: &mut dyn VariableScope,
        execution: &ExecutionContext,
    ) -> Result<StepCompletion, DecisionTaskError> {
        let span = info_span!(
            "decision_task",
            activity_id = %task.activity_id(),
            process_instance_id = %execution.process_instance_id,
        );
        let _guard = span.enter();

        let decision = self.resolver.resolve(task.reference(), Some(execution))?;
        debug!(decision_id = %decision.id, version = decision.version, "resolved decision");

        let context = scope.evaluation_context();
        let result = self.evaluate(&decision, &context, Some(task.activity_id()))?;

        let history_event_id = self.record_history(&decision, &result, Some(execution))?;

        scope.write_transient_local(
            DECISION_RESULT_VARIABLE,
            TransientValue::DecisionResult(result.clone()),
        );

        let mut mapped_variable = None;
        if let Some(mapping) = task.result_mapping() {
            let value = mapping.mapper.map(&result)?;
            scope.write_persistent(&mapping.variable, value.clone())?;
            debug!(variable = %mapping.variable, mapper = %mapping.mapper, "stored mapped decision result");
            mapped_variable = Some(MappedVariable {
                name: mapping.variable.clone(),
                value,
            });
        }

        for mapping in task.output_mappings() {
            let value = output_value(scope, &mapping.source)?;
            scope.write_persistent(&mapping.target, value)?;
        }

        info!(
            decision_key = %decision.key,
            matches = result.matches().len(),
            "decision task completed"
        );

        Ok(StepCompletion {
            activity_id: task.activity_id().to_string(),
            mapped_variable,
            history_event_id,
        })
    }

    pub(crate) fn evaluate(
        &self,
        decision: &DecisionDefinition,
        context: &EvaluationContext,
        activity_id: Option<&str>,
    ) -> Result<EvaluationResult, EvaluationError> {
        self.interceptors.invoke(
            self.evaluator.as_ref(),
            DecisionInvocation {
                decision,
                context,
                activity_id,
            },
        )
    }

    /// Build and emit the history event.
    ///
    /// A sink failure is logged and ignored unless the engine is configured
    /// to fail on it.
    pub(crate) fn record_history(
        &self,
        decision: &DecisionDefinition,
        result: &EvaluationResult,
        execution: Option<&ExecutionContext>,
    ) -> Result<Option<DecisionInstanceId>, DecisionTaskError> {
        if !self.config.history_enabled {
            return Ok(None);
        }

        let event = self.producer.build(decision, result, execution)?;
        match self.sink.append(&event) {
            Ok(()) => {}
            Err(err) if self.config.fail_on_history_sink_error => return Err(err.into()),
            Err(err) => {
                warn!(
                    event_id = %event.id(),
                    decision_id = %decision.id,
                    error = %err,
                    "history sink rejected decision event; continuing"
                );
            }
        }
        Ok(Some(event.id()))
    }
}

/// Read output `source` of the single rule match held in the transient result.
fn output_value(scope: &dyn VariableScope, source: &str) -> Result<TypedValue, MappingError> {
    let failure = |result: &EvaluationResult, cause: String| MappingError {
        mapper: OUTPUT_MAPPING,
        result: result.summary(),
        cause,
    };

    let Some(result) = scope
        .read_transient(DECISION_RESULT_VARIABLE)
        .and_then(TransientValue::as_decision_result)
    else {
        return Err(MappingError {
            mapper: OUTPUT_MAPPING,
            result: String::new(),
            cause: format!("no transient '{DECISION_RESULT_VARIABLE}' in scope"),
        });
    };

    match result.matches() {
        [only] => only
            .output_map()
            .get(source)
            .cloned()
            .ok_or_else(|| failure(result, format!("rule '{}' has no output '{source}'", only.rule_id))),
        matches => Err(failure(
            result,
            format!("expected exactly one matched rule but {} matched", matches.len()),
        )),
    }
}
