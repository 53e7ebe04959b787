//! HistoryEventProducer - 評価結果から監査レコードを構築
//!
//! # 構築ルール
//! - 入力: 評価器が報告した順に 1 句 1 レコード（値は untyped 正規化）
//! - 出力: マッチ順 × 句順に 1 レコード、`rule_order` は 1 始まり
//! - collect 集約値は integer / long / double のみ（double に正規化）
//! - プロセス実行中なら相関情報をすべて埋める、スタンドアロンなら一切埋めない
//! - 評価時刻は評価器呼び出し時ではなく構築時に Clock から読む

use std::sync::Arc;

use crate::domain::{
    DecisionDefinition, EvaluationResult, ExecutionContext, HistoryEvent, HistoryEventType,
    InputInstance, OutputInstance, ProcessCorrelation, TypedValue,
    UnsupportedAggregationTypeError,
};
use crate::ports::{Clock, IdGenerator};

/// The kinds a collect aggregation may produce.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericAggregate {
    Integer(i32),
    Long(i64),
    Double(f64),
}

impl NumericAggregate {
    pub fn to_f64(self) -> f64 {
        match self {
            NumericAggregate::Integer(i) => f64::from(i),
            NumericAggregate::Long(l) => l as f64,
            NumericAggregate::Double(d) => d,
        }
    }
}

impl TryFrom<&TypedValue> for NumericAggregate {
    type Error = UnsupportedAggregationTypeError;

    fn try_from(value: &TypedValue) -> Result<Self, Self::Error> {
        match value {
            TypedValue::Integer(i) => Ok(NumericAggregate::Integer(*i)),
            TypedValue::Long(l) => Ok(NumericAggregate::Long(*l)),
            TypedValue::Double(d) => Ok(NumericAggregate::Double(*d)),
            other => Err(UnsupportedAggregationTypeError { kind: other.kind() }),
        }
    }
}

/// Builds [`HistoryEvent`]s.
#[derive(Clone)]
pub struct HistoryEventProducer {
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl HistoryEventProducer {
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { clock, ids }
    }

    /// Build the audit record of one evaluation.
    ///
    /// `execution` is `None` for a standalone evaluation.
    pub fn build(
        &self,
        decision: &DecisionDefinition,
        result: &EvaluationResult,
        execution: Option<&ExecutionContext>,
    ) -> Result<HistoryEvent, UnsupportedAggregationTypeError> {
        let collect_result_value = result
            .collect_aggregate()
            .map(|value| NumericAggregate::try_from(value).map(NumericAggregate::to_f64))
            .transpose()?;

        let id = self.ids.decision_instance_id();

        let inputs = result
            .inputs()
            .iter()
            .map(|input| InputInstance {
                id: self.ids.input_instance_id(),
                decision_instance_id: id,
                clause_id: input.clause_id.clone(),
                clause_name: input.clause_name.clone(),
                value: input.value.clone().normalized(),
            })
            .collect();

        let mut outputs = Vec::new();
        for (index, rule) in result.matches().iter().enumerate() {
            let rule_order = index + 1;
            for output in rule.outputs() {
                outputs.push(OutputInstance {
                    id: self.ids.output_instance_id(),
                    decision_instance_id: id,
                    clause_id: output.clause_id.clone(),
                    clause_name: output.clause_name.clone(),
                    rule_id: rule.rule_id.clone(),
                    rule_order,
                    variable_name: output.output_name.clone(),
                    value: output.value.clone().normalized(),
                });
            }
        }

        let correlation = execution.map(|ctx| ProcessCorrelation {
            process_definition_key: ctx.process_definition_key.clone(),
            process_definition_id: ctx.process_definition_id.clone(),
            process_instance_id: ctx.process_instance_id.clone(),
            activity_id: ctx.activity_id.clone(),
            activity_instance_id: ctx.activity_instance_id.clone(),
        });

        Ok(HistoryEvent {
            id,
            event_type: HistoryEventType::Evaluate,
            evaluation_time: self.clock.now(),
            decision_definition_id: decision.id.clone(),
            decision_definition_key: decision.key.clone(),
            decision_definition_name: decision.name.clone(),
            collect_result_value,
            inputs,
            outputs,
            correlation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{InputEntry, OutputEntry, RuleMatch, ValueKind};
    use crate::ports::{FixedClock, UlidGenerator};
    use chrono::{Duration, TimeZone, Utc};
    use rstest::rstest;
    use serde_json::json;

    fn producer(clock: Arc<FixedClock>) -> HistoryEventProducer {
        HistoryEventProducer::new(clock.clone(), Arc::new(UlidGenerator::new(clock)))
    }

    fn clock() -> Arc<FixedClock> {
        Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
        ))
    }

    fn decision() -> DecisionDefinition {
        DecisionDefinition::new("approver:2:abc", "approver", 2).with_name("Approver")
    }

    fn two_rule_result() -> EvaluationResult {
        EvaluationResult::new()
            .with_input(InputEntry::new("in_amount", 120).named("Amount"))
            .with_input(InputEntry::new("in_category", "travel").named("Category"))
            .with_match(
                RuleMatch::new("rule_a")
                    .with_output(OutputEntry::new("out_1", "result1", "foo").named("Result 1"))
                    .with_output(OutputEntry::new("out_2", "result2", "bar")),
            )
            .with_match(
                RuleMatch::new("rule_b").with_output(OutputEntry::new("out_1", "result1", "baz")),
            )
    }

    #[test]
    fn copies_decision_identity() {
        let event = producer(clock())
            .build(&decision(), &two_rule_result(), None)
            .unwrap();

        assert_eq!(event.event_type().event_name(), "evaluate");
        assert_eq!(event.decision_definition_id(), "approver:2:abc");
        assert_eq!(event.decision_definition_key(), "approver");
        assert_eq!(event.decision_definition_name(), Some("Approver"));
        assert!(event.id().to_string().starts_with("decinst-"));
    }

    #[test]
    fn inputs_preserve_reported_order() {
        let event = producer(clock())
            .build(&decision(), &two_rule_result(), None)
            .unwrap();

        let ids: Vec<&str> = event.inputs().iter().map(|i| i.clause_id()).collect();
        assert_eq!(ids, vec!["in_amount", "in_category"]);
        assert_eq!(event.inputs()[0].clause_name(), Some("Amount"));
        assert_eq!(event.inputs()[0].value(), &TypedValue::Integer(120));
        assert!(
            event
                .inputs()
                .iter()
                .all(|i| i.decision_instance_id() == event.id())
        );
    }

    #[test]
    fn outputs_follow_rule_then_clause_order_with_one_based_rule_order() {
        let event = producer(clock())
            .build(&decision(), &two_rule_result(), None)
            .unwrap();

        let rows: Vec<(&str, usize, &str, &str)> = event
            .outputs()
            .iter()
            .map(|o| (o.rule_id(), o.rule_order(), o.clause_id(), o.variable_name()))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("rule_a", 1, "out_1", "result1"),
                ("rule_a", 1, "out_2", "result2"),
                ("rule_b", 2, "out_1", "result1"),
            ]
        );
        assert_eq!(event.outputs()[0].clause_name(), Some("Result 1"));
        assert_eq!(event.outputs()[2].value(), &TypedValue::string("baz"));
    }

    #[test]
    fn rule_order_keeps_counting_past_small_integer_widths() {
        let result = (0..70_000_i32)
            .map(|i| RuleMatch::new(format!("r{i}")).with_output(OutputEntry::new("c", "out", i)))
            .fold(EvaluationResult::new(), EvaluationResult::with_match);

        let event = producer(clock()).build(&decision(), &result, None).unwrap();

        let orders: Vec<usize> = event.outputs().iter().map(|o| o.rule_order()).collect();
        assert_eq!(orders.len(), 70_000);
        assert!(orders.iter().enumerate().all(|(i, &order)| order == i + 1));
        assert_eq!(event.outputs()[65_536].rule_id(), "r65536");
    }

    #[test]
    fn values_are_normalized() {
        let result = EvaluationResult::new()
            .with_input(InputEntry::new("in", TypedValue::Object(json!(5_000_000_000i64))));
        let event = producer(clock()).build(&decision(), &result, None).unwrap();
        assert_eq!(event.inputs()[0].value(), &TypedValue::Long(5_000_000_000));
    }

    #[test]
    fn evaluation_time_is_read_at_build_time() {
        let clock = clock();
        let producer = producer(clock.clone());
        let result = two_rule_result();

        clock.advance(Duration::minutes(5));
        let event = producer.build(&decision(), &result, None).unwrap();

        assert_eq!(
            event.evaluation_time(),
            Utc.with_ymd_and_hms(2024, 3, 1, 9, 35, 0).unwrap()
        );
    }

    #[test]
    fn correlation_is_filled_from_execution() {
        let ctx = ExecutionContext::new("invoice", "invoice:1:p", "pi-1", "assign", "assign:1");
        let event = producer(clock())
            .build(&decision(), &two_rule_result(), Some(&ctx))
            .unwrap();

        let c = event.correlation().expect("correlated");
        assert_eq!(c.process_definition_key, "invoice");
        assert_eq!(c.process_definition_id, "invoice:1:p");
        assert_eq!(c.process_instance_id, "pi-1");
        assert_eq!(c.activity_id, "assign");
        assert_eq!(c.activity_instance_id, "assign:1");
    }

    #[test]
    fn standalone_evaluation_has_no_correlation() {
        let event = producer(clock())
            .build(&decision(), &two_rule_result(), None)
            .unwrap();
        assert!(event.is_standalone());

        let v = serde_json::to_value(&event).unwrap();
        assert!(v.get("correlation").is_none());
    }

    #[rstest]
    #[case(TypedValue::Integer(3), 3.0)]
    #[case(TypedValue::Long(9_000_000_000), 9_000_000_000.0)]
    #[case(TypedValue::Double(2.5), 2.5)]
    fn numeric_aggregates_become_doubles(#[case] aggregate: TypedValue, #[case] expected: f64) {
        let result = two_rule_result().with_collect_aggregate(aggregate);
        let event = producer(clock()).build(&decision(), &result, None).unwrap();
        assert_eq!(event.collect_result_value(), Some(expected));
    }

    #[rstest]
    #[case(TypedValue::string("3"), ValueKind::String)]
    #[case(TypedValue::Boolean(true), ValueKind::Boolean)]
    #[case(TypedValue::Null, ValueKind::Null)]
    #[case(TypedValue::Object(json!(3)), ValueKind::Object)]
    fn non_numeric_aggregates_are_rejected(#[case] aggregate: TypedValue, #[case] kind: ValueKind) {
        let result = two_rule_result().with_collect_aggregate(aggregate);
        let err = producer(clock())
            .build(&decision(), &result, None)
            .unwrap_err();
        assert_eq!(err, UnsupportedAggregationTypeError { kind });
    }

    #[test]
    fn no_aggregate_means_no_collect_value() {
        let event = producer(clock())
            .build(&decision(), &two_rule_result(), None)
            .unwrap();
        assert_eq!(event.collect_result_value(), None);
    }
}
