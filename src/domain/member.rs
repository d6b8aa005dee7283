use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{DeleteMemberError, Loan, MemberId};

/// 成年年齢
pub const MAJORITY_AGE: u32 = 18;

/// 会員
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub first_name: String,
    pub birthday: NaiveDate,
}

impl Member {
    /// 満年齢（誕生日が未来の場合は None）
    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        today.years_since(self.birthday)
    }

    /// 未成年か
    ///
    /// 満年齢が`MAJORITY_AGE`未満なら未成年。誕生日が未来の会員も未成年として扱う。
    pub fn is_minor(&self, today: NaiveDate) -> bool {
        self.age_on(today).is_none_or(|age| age < MAJORITY_AGE)
    }
}

/// 会員を削除できるか判定する
///
/// `loans`は会員の全貸出。未返却の貸出が1つでもあれば削除できない。
/// 返却済みの貸出は蔵書の履歴として会員の削除後も残る。
pub fn check_member_deletion(loans: &[Loan]) -> Result<(), DeleteMemberError> {
    if loans.iter().any(|l| !l.is_returned()) {
        return Err(DeleteMemberError::HasUnreturnedLoan);
    }
    Ok(())
}
