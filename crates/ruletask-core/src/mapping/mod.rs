//! Mapping - 評価結果を変数に保存できる値へ変換する戦略
//!
//! マッパーは名前の閉じた集合（`singleEntry`, `singleResult`,
//! `collectValues`, `resultList`）から配置時に 1 度だけ選ばれます。
//! 未知の名前は配置時エラーで、実行時には現れません。

mod collect;
mod mapper;
mod single;

pub use self::mapper::ResultMapper;
