//! Domain model (values, decisions, results, history events, specs, ...).

pub mod decision;
pub mod errors;
pub mod execution;
pub mod history;
pub mod ids;
pub mod result;
pub mod spec;
pub mod value;
pub mod variables;

pub use self::decision::{DecisionBinding, DecisionDefinition, DecisionReference};
pub use self::errors::{
    DecisionTaskError, DeploymentError, ErrorKind, EvaluationError, HistorySinkError,
    MappingError, NotFoundError, ReservedNameError, UnsupportedAggregationTypeError,
};
pub use self::execution::ExecutionContext;
pub use self::history::{
    HistoryEvent, HistoryEventType, InputInstance, OutputInstance, ProcessCorrelation,
};
pub use self::ids::{DecisionInstanceId, InputInstanceId, OutputInstanceId};
pub use self::result::{EvaluationResult, InputEntry, OutputEntry, RuleMatch};
pub use self::spec::{DecisionTaskSpec, EngineConfig, OutputMappingSpec};
pub use self::value::{OutputMap, TypedValue, ValueKind};
pub use self::variables::{
    DECISION_RESULT_VARIABLE, EvaluationContext, MappedVariable, TransientValue,
    VariableHistoryEntry, VariableUpdateKind,
};
