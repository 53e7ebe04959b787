//! IdGenerator port - ID 生成の抽象化
//!
//! # 実装
//! - **UlidGenerator**: ULID ベース（本番用）

use crate::domain::ids::{DecisionInstanceId, InputInstanceId, OutputInstanceId};
use crate::ports::Clock;
use ulid::Ulid;

/// IdGenerator は履歴レコードの ID を生成
///
/// # Thread Safety
/// - `Send + Sync` を要求（複数スレッドから使える）
pub trait IdGenerator: Send + Sync {
    fn decision_instance_id(&self) -> DecisionInstanceId;

    fn input_instance_id(&self) -> InputInstanceId;

    fn output_instance_id(&self) -> OutputInstanceId;
}

/// UlidGenerator は ULID ベースの ID 生成器
///
/// Clock を使って現在時刻ベースの ULID を生成します。
/// テスト時に FixedClock を使えば timestamp 部分が決定的になります。
pub struct UlidGenerator<C> {
    clock: C,
}

impl<C: Clock> UlidGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    fn next(&self) -> Ulid {
        let timestamp_ms = self.clock.now().timestamp_millis().max(0) as u64;
        Ulid::from_parts(timestamp_ms, rand::random())
    }
}

impl<C: Clock> IdGenerator for UlidGenerator<C> {
    fn decision_instance_id(&self) -> DecisionInstanceId {
        DecisionInstanceId::from(self.next())
    }

    fn input_instance_id(&self) -> InputInstanceId {
        InputInstanceId::from(self.next())
    }

    fn output_instance_id(&self) -> OutputInstanceId {
        OutputInstanceId::from(self.next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{FixedClock, SystemClock};
    use chrono::{TimeZone, Utc};

    #[test]
    fn ulid_generator_generates_unique_ids() {
        let id_gen = UlidGenerator::new(SystemClock);

        let id1 = id_gen.decision_instance_id();
        let id2 = id_gen.decision_instance_id();
        let id3 = id_gen.decision_instance_id();

        assert_ne!(id1, id2);
        assert_ne!(id2, id3);
        assert_ne!(id1, id3);
    }

    #[test]
    fn ulid_generator_with_fixed_clock_shares_timestamp() {
        let fixed_time = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let id_gen = UlidGenerator::new(FixedClock::new(fixed_time));

        let id1 = id_gen.decision_instance_id();
        let id2 = id_gen.output_instance_id();

        // ランダム部分があるので ID 自体は異なる
        assert_ne!(id1.as_ulid(), id2.as_ulid());

        assert_eq!(id1.as_ulid().timestamp_ms(), id2.as_ulid().timestamp_ms());
        assert_eq!(
            id1.as_ulid().timestamp_ms(),
            fixed_time.timestamp_millis() as u64
        );
    }
}
