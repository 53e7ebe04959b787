//! DecisionTask - 配置済みの business-rule task
//!
//! `DecisionTaskSpec` を配置時に検証した結果です。マッパー名はここで
//! [`ResultMapper`] に束縛済みなので、実行時に名前解決は起きません。

use crate::domain::{
    DecisionInstanceId, DecisionReference, DeploymentError, DecisionTaskSpec, MappedVariable,
    OutputMappingSpec,
};
use crate::mapping::ResultMapper;
use serde::Serialize;

/// Where and how the mapped result is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultMapping {
    pub variable: String,
    pub mapper: ResultMapper,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionTask {
    activity_id: String,
    reference: DecisionReference,
    result_mapping: Option<ResultMapping>,
    output_mappings: Vec<OutputMappingSpec>,
}

impl DecisionTask {
    /// Validate a task configuration.
    ///
    /// The mapper name is checked even when no result variable is set, so a
    /// typo never survives deployment.
    pub fn deploy(spec: DecisionTaskSpec) -> Result<Self, DeploymentError> {
        let activity_id = spec.activity_id;
        if activity_id.is_empty() {
            return Err(DeploymentError::EmptyName {
                activity_id,
                field: "activityId",
            });
        }
        if spec.decision_ref.key.is_empty() {
            return Err(DeploymentError::EmptyName {
                activity_id,
                field: "decisionRef.key",
            });
        }

        let mapper = match ResultMapper::from_name(spec.map_decision_result.as_deref()) {
            Ok(mapper) => mapper,
            Err(source) => {
                return Err(DeploymentError::UnknownMapper {
                    activity_id,
                    source,
                });
            }
        };

        let result_mapping = match spec.result_variable {
            Some(variable) if variable.is_empty() => {
                return Err(DeploymentError::EmptyName {
                    activity_id,
                    field: "resultVariable",
                });
            }
            Some(variable) => Some(ResultMapping { variable, mapper }),
            None => None,
        };

        if spec.output_mappings.iter().any(|m| m.target.is_empty() || m.source.is_empty()) {
            return Err(DeploymentError::EmptyName {
                activity_id,
                field: "outputMappings",
            });
        }

        Ok(Self {
            activity_id,
            reference: spec.decision_ref,
            result_mapping,
            output_mappings: spec.output_mappings,
        })
    }

    pub fn activity_id(&self) -> &str {
        &self.activity_id
    }

    pub fn reference(&self) -> &DecisionReference {
        &self.reference
    }

    pub fn result_mapping(&self) -> Option<&ResultMapping> {
        self.result_mapping.as_ref()
    }

    pub fn output_mappings(&self) -> &[OutputMappingSpec] {
        &self.output_mappings
    }
}

/// Normal completion of a business-rule task step.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepCompletion {
    pub activity_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mapped_variable: Option<MappedVariable>,
    /// `None` when history is disabled.
    pub history_event_id: Option<DecisionInstanceId>,
}
