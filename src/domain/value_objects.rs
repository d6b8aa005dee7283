use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ConditionError;

/// 貸出ID - 貸出集約の識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoanId(Uuid);

impl LoanId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for LoanId {
    fn default() -> Self {
        Self::new()
    }
}

/// 蔵書（物理的な1冊）ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookCopyId(Uuid);

impl BookCopyId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for BookCopyId {
    fn default() -> Self {
        Self::new()
    }
}

/// 書籍ID - カタログ上の書誌への参照
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookId(Uuid);

impl BookId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for BookId {
    fn default() -> Self {
        Self::new()
    }
}

/// 会員ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberId(Uuid);

impl MemberId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for MemberId {
    fn default() -> Self {
        Self::new()
    }
}

/// 書籍カテゴリID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryId(Uuid);

impl CategoryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for CategoryId {
    fn default() -> Self {
        Self::new()
    }
}

/// 蔵書の状態（物理的な損耗度）
///
/// 不変条件：ランクは BAD(1) < USED(2) < GOOD(3) < VERY_GOOD(4) < NEW(5) で固定。
/// 比較は常にランクで行い、システム全体の数値比較に使われる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Condition {
    Bad,
    Used,
    Good,
    VeryGood,
    New,
}

impl Condition {
    /// 数値ランク（1..=5）
    pub fn rank(self) -> u8 {
        match self {
            Condition::Bad => 1,
            Condition::Used => 2,
            Condition::Good => 3,
            Condition::VeryGood => 4,
            Condition::New => 5,
        }
    }

    /// ランクから状態を復元する
    ///
    /// # エラー
    /// 1..=5 以外は`ConditionError::InvalidRank`
    pub fn from_rank(rank: i32) -> Result<Self, ConditionError> {
        match rank {
            1 => Ok(Condition::Bad),
            2 => Ok(Condition::Used),
            3 => Ok(Condition::Good),
            4 => Ok(Condition::VeryGood),
            5 => Ok(Condition::New),
            _ => Err(ConditionError::InvalidRank(rank)),
        }
    }

    /// 状態の比較。欠損（None）はランク -1 として BAD より下に並ぶ。
    pub fn compare(a: Option<Condition>, b: Option<Condition>) -> Ordering {
        let rank = |c: Option<Condition>| c.map_or(-1, |c| i32::from(c.rank()));
        rank(a).cmp(&rank(b))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Bad => "BAD",
            Condition::Used => "USED",
            Condition::Good => "GOOD",
            Condition::VeryGood => "VERY_GOOD",
            Condition::New => "NEW",
        }
    }
}

impl PartialOrd for Condition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Condition {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl TryFrom<i32> for Condition {
    type Error = ConditionError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Condition::from_rank(value)
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_total_order_by_rank() {
        assert!(Condition::Bad < Condition::Used);
        assert!(Condition::Used < Condition::Good);
        assert!(Condition::Good < Condition::VeryGood);
        assert!(Condition::VeryGood < Condition::New);
        assert_eq!(Condition::Good.max(Condition::Used), Condition::Good);
    }

    #[test]
    fn test_condition_from_rank_valid() {
        for rank in 1..=5 {
            let condition = Condition::from_rank(rank).unwrap();
            assert_eq!(i32::from(condition.rank()), rank);
        }
    }

    #[test]
    fn test_condition_from_rank_invalid() {
        assert_eq!(Condition::from_rank(0), Err(ConditionError::InvalidRank(0)));
        assert_eq!(Condition::from_rank(6), Err(ConditionError::InvalidRank(6)));
        assert!(Condition::try_from(-1).is_err());
    }

    #[test]
    fn test_condition_compare_treats_missing_as_lowest() {
        assert_eq!(
            Condition::compare(None, Some(Condition::Bad)),
            Ordering::Less
        );
        assert_eq!(Condition::compare(None, None), Ordering::Equal);
        assert_eq!(
            Condition::compare(Some(Condition::New), Some(Condition::VeryGood)),
            Ordering::Greater
        );
    }

    #[test]
    fn test_condition_serializes_as_screaming_snake_case() {
        let json = serde_json::to_string(&Condition::VeryGood).unwrap();
        assert_eq!(json, "\"VERY_GOOD\"");
        let parsed: Condition = serde_json::from_str("\"BAD\"").unwrap();
        assert_eq!(parsed, Condition::Bad);
    }

    #[test]
    fn test_loan_id_creation() {
        let id1 = LoanId::new();
        let id2 = LoanId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_book_copy_id_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = BookCopyId::from_uuid(uuid);
        assert_eq!(id.value(), uuid);
    }
}
