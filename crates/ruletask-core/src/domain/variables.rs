//! Process variables as seen by a decision invocation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::result::EvaluationResult;
use super::value::TypedValue;

/// Transient key under which the raw evaluation result is held for the
/// duration of the business-rule task.
pub const DECISION_RESULT_VARIABLE: &str = "decisionResult";

/// A value held only by the current execution frame.
///
/// Transient values are never persisted, so they may hold things that are
/// not [`TypedValue`]s, such as the raw evaluation result.
#[derive(Debug, Clone, PartialEq)]
pub enum TransientValue {
    Value(TypedValue),
    DecisionResult(EvaluationResult),
}

impl TransientValue {
    pub fn as_decision_result(&self) -> Option<&EvaluationResult> {
        match self {
            TransientValue::DecisionResult(result) => Some(result),
            TransientValue::Value(_) => None,
        }
    }
}

/// A result value written to the persistent scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappedVariable {
    pub name: String,
    pub value: TypedValue,
}

/// Read-only view of the variables visible to the evaluator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationContext {
    variables: BTreeMap<String, TypedValue>,
}

impl EvaluationContext {
    pub fn new(variables: BTreeMap<String, TypedValue>) -> Self {
        Self { variables }
    }

    pub fn get(&self, name: &str) -> Option<&TypedValue> {
        self.variables.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

impl FromIterator<(String, TypedValue)> for EvaluationContext {
    fn from_iter<I: IntoIterator<Item = (String, TypedValue)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VariableUpdateKind {
    Create,
    Update,
}

/// One entry of the engine's own variable history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableHistoryEntry {
    pub name: String,
    pub kind: VariableUpdateKind,
    pub value: TypedValue,
}
