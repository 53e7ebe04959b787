//! HistorySink 実装
//!
//! - **LoggingHistorySink**: tracing に要約を出すだけ（デフォルト）
//! - **InMemoryHistorySink**: イベントを保持する（テスト・CLI 用）

use std::sync::{Mutex, PoisonError};

use tracing::info;

use crate::domain::{HistoryEvent, HistorySinkError};
use crate::ports::HistorySink;

#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingHistorySink;

impl HistorySink for LoggingHistorySink {
    fn append(&self, event: &HistoryEvent) -> Result<(), HistorySinkError> {
        info!(
            event_id = %event.id(),
            event_type = event.event_type().event_name(),
            decision_id = %event.decision_definition_id(),
            inputs = event.inputs().len(),
            outputs = event.outputs().len(),
            standalone = event.is_standalone(),
            "decision history event"
        );
        Ok(())
    }
}

/// Keeps every appended event in order.
///
/// `failing()` builds a sink that rejects every event, for exercising the
/// sink-failure policy.
#[derive(Debug, Default)]
pub struct InMemoryHistorySink {
    events: Mutex<Vec<HistoryEvent>>,
    reject_with: Option<String>,
}

impl InMemoryHistorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            events: Mutex::default(),
            reject_with: Some(reason.into()),
        }
    }

    pub fn events(&self) -> Vec<HistoryEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl HistorySink for InMemoryHistorySink {
    fn append(&self, event: &HistoryEvent) -> Result<(), HistorySinkError> {
        if let Some(reason) = &self.reject_with {
            return Err(HistorySinkError(reason.clone()));
        }
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
        Ok(())
    }
}
