//! Execution context: where in a running process an evaluation happens.

use serde::{Deserialize, Serialize};

/// Identity of the execution that reached the business-rule task.
///
/// All correlation fields are required so a history event is either fully
/// correlated or (for standalone evaluation) not correlated at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionContext {
    pub process_definition_key: String,
    pub process_definition_id: String,
    pub process_instance_id: String,
    pub activity_id: String,
    pub activity_instance_id: String,
    /// Deployment of the process definition; used by the `deployment` binding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment_id: Option<String>,
}

impl ExecutionContext {
    pub fn new(
        process_definition_key: impl Into<String>,
        process_definition_id: impl Into<String>,
        process_instance_id: impl Into<String>,
        activity_id: impl Into<String>,
        activity_instance_id: impl Into<String>,
    ) -> Self {
        Self {
            process_definition_key: process_definition_key.into(),
            process_definition_id: process_definition_id.into(),
            process_instance_id: process_instance_id.into(),
            activity_id: activity_id.into(),
            activity_instance_id: activity_instance_id.into(),
            deployment_id: None,
        }
    }

    pub fn with_deployment(mut self, deployment_id: impl Into<String>) -> Self {
        self.deployment_id = Some(deployment_id.into());
        self
    }
}
