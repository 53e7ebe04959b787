//! HistorySink port - 決定履歴の記録
//!
//! # 実装
//! - **LoggingHistorySink**: tracing に出力するだけ（デフォルト）
//! - **InMemoryHistorySink**: テスト・開発用

use crate::domain::{HistoryEvent, HistorySinkError};

/// HistorySink は構築済みの履歴イベントを受け取る
///
/// 失敗しても既定では業務処理を止めません（ログのみ）。
/// `EngineConfig::fail_on_history_sink_error` で変更できます。
pub trait HistorySink: Send + Sync {
    fn append(&self, event: &HistoryEvent) -> Result<(), HistorySinkError>;
}
