//! DecisionDefinitionResolver port - 決定参照の解決
//!
//! # 実装
//! - **InMemoryDecisionRepository**（impls）: latest / version / deployment binding

use crate::domain::{DecisionDefinition, DecisionReference, ExecutionContext, NotFoundError};

/// DecisionDefinitionResolver は task の参照を配置済み定義に解決
///
/// `execution` が `None` のときはスタンドアロン評価
/// （`deployment` binding は解決できない）。
pub trait DecisionDefinitionResolver: Send + Sync {
    fn resolve(
        &self,
        reference: &DecisionReference,
        execution: Option<&ExecutionContext>,
    ) -> Result<DecisionDefinition, NotFoundError>;
}
