//! History record identifiers (strongly-typed IDs).
//!
//! # ULID ベースの ID
//! 決定履歴のレコードは ULID で識別します。
//! - **時刻でソート可能**: 評価順に並ぶ
//! - **分散生成可能**: 複数ノードのエンジンから衝突なく発行できる
//!
//! `Id<T>` は Phantom type パターンで、評価インスタンスと
//! 入力・出力インスタンスの ID をコンパイル時に区別します。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use ulid::Ulid;

/// IdMarker は各 ID 型のマーカー trait
///
/// Display で使うプレフィックス（"decinst-", "decin-", "decout-"）を提供します。
pub trait IdMarker: Send + Sync + 'static {
    fn prefix() -> &'static str;
}

/// ジェネリック ID 型
///
/// ```ignore
/// let event_id: DecisionInstanceId = Id::from(Ulid::new());
/// let input_id: InputInstanceId = Id::from(Ulid::new());
/// // event_id と input_id は異なる型なので、混同できない
/// ```
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id<T: IdMarker> {
    ulid: Ulid,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T: IdMarker> Id<T> {
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self {
            ulid,
            _marker: PhantomData,
        }
    }

    pub fn as_ulid(&self) -> Ulid {
        self.ulid
    }
}

impl<T: IdMarker> From<Ulid> for Id<T> {
    fn from(ulid: Ulid) -> Self {
        Self::from_ulid(ulid)
    }
}

impl<T: IdMarker> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", T::prefix(), self.ulid)
    }
}

// ========================================
// マーカー型の定義
// ========================================

/// One evaluated decision (the history event itself).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DecisionInstance {}

impl IdMarker for DecisionInstance {
    fn prefix() -> &'static str {
        "decinst-"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InputInstance {}

impl IdMarker for InputInstance {
    fn prefix() -> &'static str {
        "decin-"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OutputInstance {}

impl IdMarker for OutputInstance {
    fn prefix() -> &'static str {
        "decout-"
    }
}

// ========================================
// Type Alias
// ========================================

/// Identifier of a decision history event.
pub type DecisionInstanceId = Id<DecisionInstance>;

/// Identifier of one recorded input clause value.
pub type InputInstanceId = Id<InputInstance>;

/// Identifier of one recorded output clause value.
pub type OutputInstanceId = Id<OutputInstance>;
