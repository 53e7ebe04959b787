//! Errors - エラー型と分類
//!
//! 各エラーは発生箇所ごとに独立した型を持ち、オーケストレータは
//! [`DecisionTaskError`] にまとめて呼び出し元へそのまま伝播します。
//! リトライや握りつぶしはこの crate では行いません。

use thiserror::Error;

use super::decision::DecisionReference;
use super::value::ValueKind;

/// ErrorKind は呼び出し元のエラーポリシー用の分類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    Evaluation,
    Mapping,
    UnsupportedAggregationType,
    ReservedName,
    HistorySink,
    Configuration,
}

/// Something referenced by name does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotFoundError {
    #[error("no decision definition found for '{reference}'")]
    DecisionDefinition { reference: DecisionReference },

    #[error("no decision definition found for '{reference}' in deployment '{deployment_id}'")]
    DecisionDefinitionInDeployment {
        reference: DecisionReference,
        deployment_id: String,
    },

    #[error("No decision result mapper found for name '{0}'")]
    ResultMapper(String),
}

/// The evaluator could not produce a result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("evaluation of decision '{decision_id}' failed: {message}")]
pub struct EvaluationError {
    pub decision_id: String,
    pub message: String,
}

impl EvaluationError {
    pub fn new(decision_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            decision_id: decision_id.into(),
            message: message.into(),
        }
    }
}

/// The result does not have the shape the selected mapper requires.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("The decision result mapper failed to process '{result}' ({mapper}): {cause}")]
pub struct MappingError {
    pub mapper: &'static str,
    /// Summary of the offending result.
    pub result: String,
    pub cause: String,
}

/// A collect aggregate of a non-numeric kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("collect result value of type '{kind}' is not supported; expected integer, long or double")]
pub struct UnsupportedAggregationTypeError {
    pub kind: ValueKind,
}

/// A persistent write collided with the reserved transient key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("variable with name '{name}' can not be updated: it holds a transient value in the current scope")]
pub struct ReservedNameError {
    pub name: String,
}

/// The history sink refused an event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("history sink failed: {0}")]
pub struct HistorySinkError(pub String);

/// Everything a decision invocation can fail with.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecisionTaskError {
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error(transparent)]
    UnsupportedAggregationType(#[from] UnsupportedAggregationTypeError),

    #[error(transparent)]
    ReservedName(#[from] ReservedNameError),

    /// Only raised when the engine is configured to fail on sink errors.
    #[error(transparent)]
    HistorySink(#[from] HistorySinkError),
}

impl DecisionTaskError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecisionTaskError::NotFound(_) => ErrorKind::NotFound,
            DecisionTaskError::Evaluation(_) => ErrorKind::Evaluation,
            DecisionTaskError::Mapping(_) => ErrorKind::Mapping,
            DecisionTaskError::UnsupportedAggregationType(_) => {
                ErrorKind::UnsupportedAggregationType
            }
            DecisionTaskError::ReservedName(_) => ErrorKind::ReservedName,
            DecisionTaskError::HistorySink(_) => ErrorKind::HistorySink,
        }
    }
}

/// A task configuration that can not be deployed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeploymentError {
    #[error("activity '{activity_id}': {source}")]
    UnknownMapper {
        activity_id: String,
        #[source]
        source: NotFoundError,
    },

    #[error("activity '{activity_id}': {field} must not be empty")]
    EmptyName {
        activity_id: String,
        field: &'static str,
    },
}

impl DeploymentError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DeploymentError::UnknownMapper { .. } => ErrorKind::NotFound,
            DeploymentError::EmptyName { .. } => ErrorKind::Configuration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_name_error_names_the_key() {
        let err = ReservedNameError {
            name: "decisionResult".to_string(),
        };
        assert!(
            err.to_string()
                .contains("variable with name 'decisionResult' can not be updated")
        );
    }

    #[test]
    fn mapping_error_names_the_mapper_after_the_result() {
        let err = MappingError {
            mapper: "singleEntry",
            result: r#"[r1{result1="foo", result2="bar"}]"#.to_string(),
            cause: "expected exactly one output entry but rule 'r1' has 2".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "The decision result mapper failed to process '[r1{result1=\"foo\", result2=\"bar\"}]' \
             (singleEntry): expected exactly one output entry but rule 'r1' has 2"
        );
    }

    #[test]
    fn errors_convert_into_task_error_with_kind() {
        let err: DecisionTaskError = EvaluationError::new("d1", "boom").into();
        assert_eq!(err.kind(), ErrorKind::Evaluation);
        assert_eq!(err.to_string(), "evaluation of decision 'd1' failed: boom");

        let err: DecisionTaskError = NotFoundError::ResultMapper("invalid".into()).into();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(
            err.to_string(),
            "No decision result mapper found for name 'invalid'"
        );
    }
}
