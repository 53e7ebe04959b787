//! Decision history: the immutable audit record of one evaluation.
//!
//! Events are only constructed by the history event producer
//! (`app::HistoryEventProducer`); everything here is read-only from the
//! outside.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::decision::DecisionDefinition;
use super::ids::{DecisionInstanceId, InputInstanceId, OutputInstanceId};
use super::value::TypedValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HistoryEventType {
    Evaluate,
}

impl HistoryEventType {
    pub fn event_name(&self) -> &'static str {
        match self {
            HistoryEventType::Evaluate => "evaluate",
        }
    }
}

/// Recorded value of one input clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputInstance {
    pub(crate) id: InputInstanceId,
    pub(crate) decision_instance_id: DecisionInstanceId,
    pub(crate) clause_id: String,
    pub(crate) clause_name: Option<String>,
    pub(crate) value: TypedValue,
}

impl InputInstance {
    pub fn id(&self) -> InputInstanceId {
        self.id
    }

    pub fn decision_instance_id(&self) -> DecisionInstanceId {
        self.decision_instance_id
    }

    pub fn clause_id(&self) -> &str {
        &self.clause_id
    }

    pub fn clause_name(&self) -> Option<&str> {
        self.clause_name.as_deref()
    }

    pub fn value(&self) -> &TypedValue {
        &self.value
    }
}

/// Recorded value of one output clause of one matched rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputInstance {
    pub(crate) id: OutputInstanceId,
    pub(crate) decision_instance_id: DecisionInstanceId,
    pub(crate) clause_id: String,
    pub(crate) clause_name: Option<String>,
    pub(crate) rule_id: String,
    /// 1-based position of the rule among the matches.
    pub(crate) rule_order: usize,
    pub(crate) variable_name: String,
    pub(crate) value: TypedValue,
}

impl OutputInstance {
    pub fn id(&self) -> OutputInstanceId {
        self.id
    }

    pub fn decision_instance_id(&self) -> DecisionInstanceId {
        self.decision_instance_id
    }

    pub fn clause_id(&self) -> &str {
        &self.clause_id
    }

    pub fn clause_name(&self) -> Option<&str> {
        self.clause_name.as_deref()
    }

    pub fn rule_id(&self) -> &str {
        &self.rule_id
    }

    pub fn rule_order(&self) -> usize {
        self.rule_order
    }

    pub fn variable_name(&self) -> &str {
        &self.variable_name
    }

    pub fn value(&self) -> &TypedValue {
        &self.value
    }
}

/// Links an event to the process execution that triggered it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessCorrelation {
    pub process_definition_key: String,
    pub process_definition_id: String,
    pub process_instance_id: String,
    pub activity_id: String,
    pub activity_instance_id: String,
}

/// Audit record of one decision evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEvent {
    pub(crate) id: DecisionInstanceId,
    pub(crate) event_type: HistoryEventType,
    pub(crate) evaluation_time: DateTime<Utc>,
    pub(crate) decision_definition_id: String,
    pub(crate) decision_definition_key: String,
    pub(crate) decision_definition_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) collect_result_value: Option<f64>,
    pub(crate) inputs: Vec<InputInstance>,
    pub(crate) outputs: Vec<OutputInstance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) correlation: Option<ProcessCorrelation>,
}

impl HistoryEvent {
    pub fn id(&self) -> DecisionInstanceId {
        self.id
    }

    pub fn event_type(&self) -> HistoryEventType {
        self.event_type
    }

    pub fn evaluation_time(&self) -> DateTime<Utc> {
        self.evaluation_time
    }

    pub fn decision_definition_id(&self) -> &str {
        &self.decision_definition_id
    }

    pub fn decision_definition_key(&self) -> &str {
        &self.decision_definition_key
    }

    pub fn decision_definition_name(&self) -> Option<&str> {
        self.decision_definition_name.as_deref()
    }

    pub fn collect_result_value(&self) -> Option<f64> {
        self.collect_result_value
    }

    pub fn inputs(&self) -> &[InputInstance] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[OutputInstance] {
        &self.outputs
    }

    pub fn correlation(&self) -> Option<&ProcessCorrelation> {
        self.correlation.as_ref()
    }

    pub fn is_standalone(&self) -> bool {
        self.correlation.is_none()
    }

    pub fn matches_definition(&self, definition: &DecisionDefinition) -> bool {
        self.decision_definition_id == definition.id
    }
}
