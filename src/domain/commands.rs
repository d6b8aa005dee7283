use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BookCopyId, BookCopyPatch, BookId, Condition, LoanId, MemberId, loan::LoanPatch};

/// コマンド：蔵書を貸し出す
///
/// 会員・蔵書のIDが欠けている場合は不正な引数として扱われる。
/// `loan_date_time`が未指定なら現在時刻（秒精度）で貸し出す。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateLoan {
    pub member_id: Option<MemberId>,
    pub book_copy_id: Option<BookCopyId>,
    pub loan_date_time: Option<DateTime<Utc>>,
}

/// コマンド：貸出を更新する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateLoan {
    pub loan_id: LoanId,
    pub patch: Option<LoanPatch>,
}

/// コマンド：書籍の蔵書を作成する
///
/// `initial_state`が未指定なら NEW。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBookCopies {
    pub book_id: BookId,
    pub num_copies: i32,
    pub initial_state: Option<Condition>,
}

/// コマンド：蔵書の状態・除籍フラグを更新する
///
/// 蔵書は`book_id`の書籍に属していなければならない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateBookCopy {
    pub book_id: BookId,
    pub book_copy_id: BookCopyId,
    pub patch: Option<BookCopyPatch>,
}
