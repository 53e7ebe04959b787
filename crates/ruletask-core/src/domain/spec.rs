//! Input specs: the deploy-time configuration of business-rule tasks and
//! of the engine itself.
//!
//! Specs are plain serde structs so they can be loaded from JSON. They are
//! validated once, when a task is deployed (see `app::EngineBuilder` and
//! `app::DecisionEngine::deploy`); nothing here is checked at execution time.

use serde::{Deserialize, Serialize};

use super::decision::DecisionReference;

/// One business-rule task as declared in a process model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionTaskSpec {
    pub activity_id: String,

    pub decision_ref: DecisionReference,

    /// Variable that receives the mapped result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_variable: Option<String>,

    /// Name of the result mapper; `resultList` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_decision_result: Option<String>,

    /// Copies of single-result outputs into process variables.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub output_mappings: Vec<OutputMappingSpec>,
}

impl DecisionTaskSpec {
    pub fn new(activity_id: impl Into<String>, decision_ref: DecisionReference) -> Self {
        Self {
            activity_id: activity_id.into(),
            decision_ref,
            result_variable: None,
            map_decision_result: None,
            output_mappings: Vec::new(),
        }
    }

    pub fn with_result_variable(mut self, name: impl Into<String>) -> Self {
        self.result_variable = Some(name.into());
        self
    }

    pub fn with_mapper(mut self, name: impl Into<String>) -> Self {
        self.map_decision_result = Some(name.into());
        self
    }

    pub fn with_output_mapping(
        mut self,
        target: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        self.output_mappings.push(OutputMappingSpec {
            target: target.into(),
            source: source.into(),
        });
        self
    }
}

/// `target = decisionResult.singleResult[source]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputMappingSpec {
    pub target: String,
    pub source: String,
}

/// Engine-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Build and emit a history event for every evaluation.
    pub history_enabled: bool,

    /// Abort the step when the history sink rejects an event.
    ///
    /// Off by default: a sink failure is logged and the business operation
    /// continues.
    pub fail_on_history_sink_error: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_enabled: true,
            fail_on_history_sink_error: false,
        }
    }
}
