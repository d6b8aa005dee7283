//! 蔵書ごとの貸出履歴の時系列解決
//!
//! 同じ蔵書の貸出は`loan_date_time`で全順序付けされる。
//! 履歴は順不同で受け取り、ここで前後関係を決める。

use super::loan::Loan;

/// 基準貸出より前の貸出のうち、最も新しいもの
///
/// 基準貸出自身（同じID）は対象外。貸出日時が等しい貸出は前にも後にも数えない。
pub fn most_recent_previous_loan<'a>(reference: &Loan, history: &'a [Loan]) -> Option<&'a Loan> {
    history
        .iter()
        .filter(|l| l.id != reference.id && l.loan_date_time < reference.loan_date_time)
        .max_by_key(|l| l.loan_date_time)
}

/// 基準貸出より後の貸出のうち、最も古いもの
pub fn most_ancient_next_loan<'a>(reference: &Loan, history: &'a [Loan]) -> Option<&'a Loan> {
    history
        .iter()
        .filter(|l| l.id != reference.id && l.loan_date_time > reference.loan_date_time)
        .min_by_key(|l| l.loan_date_time)
}

/// 蔵書の最新の貸出
pub fn most_recent_loan(history: &[Loan]) -> Option<&Loan> {
    history.iter().max_by_key(|l| l.loan_date_time)
}
