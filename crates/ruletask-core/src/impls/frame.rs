//! ExecutionFrame - 開発用の変数スコープ
//!
//! # 学習ポイント
//! - persistent / transient を別 map で保持
//! - transient は子フレームに継承されず、end() で破棄される
//! - persistent 書き込みだけが変数履歴に残る

use std::collections::BTreeMap;

use crate::domain::{
    EvaluationContext, ReservedNameError, TransientValue, TypedValue, VariableHistoryEntry,
    VariableUpdateKind,
};
use crate::ports::VariableScope;

/// ExecutionFrame は 1 実行単位の変数スコープ
///
/// # 使用例
/// ```ignore
/// let mut frame = ExecutionFrame::from_variables([("amount".to_string(), 120.into())]);
/// engine.execute(&task, &mut frame, &execution)?;
/// let outcome = frame.end();
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExecutionFrame {
    persistent: BTreeMap<String, TypedValue>,
    transient: BTreeMap<String, TransientValue>,
    history: Vec<VariableHistoryEntry>,
}

/// What survives a frame: persistent variables and their write log.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameOutcome {
    pub variables: BTreeMap<String, TypedValue>,
    pub history: Vec<VariableHistoryEntry>,
}

impl ExecutionFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frame seeded with initial variables; seeding is not logged.
    pub fn from_variables<I>(variables: I) -> Self
    where
        I: IntoIterator<Item = (String, TypedValue)>,
    {
        Self {
            persistent: variables.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Nested frame: inherits a copy of the persistent variables, never the
    /// transient ones.
    pub fn child(&self) -> Self {
        Self {
            persistent: self.persistent.clone(),
            ..Self::default()
        }
    }

    pub fn variables(&self) -> &BTreeMap<String, TypedValue> {
        &self.persistent
    }

    pub fn history(&self) -> &[VariableHistoryEntry] {
        &self.history
    }

    /// Close the frame. Transient values are dropped here.
    pub fn end(self) -> FrameOutcome {
        FrameOutcome {
            variables: self.persistent,
            history: self.history,
        }
    }
}

impl VariableScope for ExecutionFrame {
    fn read(&self, name: &str) -> Option<&TypedValue> {
        self.persistent.get(name)
    }

    fn read_transient(&self, name: &str) -> Option<&TransientValue> {
        self.transient.get(name)
    }

    fn write_transient_local(&mut self, name: &str, value: TransientValue) {
        self.transient.insert(name.to_string(), value);
    }

    fn write_persistent(&mut self, name: &str, value: TypedValue) -> Result<(), ReservedNameError> {
        if self.transient.contains_key(name) {
            return Err(ReservedNameError {
                name: name.to_string(),
            });
        }

        let kind = if self.persistent.contains_key(name) {
            VariableUpdateKind::Update
        } else {
            VariableUpdateKind::Create
        };
        self.history.push(VariableHistoryEntry {
            name: name.to_string(),
            kind,
            value: value.clone(),
        });
        self.persistent.insert(name.to_string(), value);
        Ok(())
    }

    fn evaluation_context(&self) -> EvaluationContext {
        self.persistent
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }
}
