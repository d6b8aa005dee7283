/// 状態ランクのエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionError {
    /// 1..=5 以外のランク
    InvalidRank(i32),
}

/// 貸出作成のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateLoanError {
    /// 未成年の会員が成人向けカテゴリの書籍を借りようとした
    MinorCannotBorrowAdultBook,
    /// 蔵書が貸出中、または除籍済み
    CopyNotAvailable,
    /// 指定日時が直近の貸出の返却日時より後ではない
    LoanDateNotAfterPreviousReturn,
    /// 同じ蔵書に同一日時の貸出が既にある
    DuplicateLoanDateTime,
}

/// 貸出更新のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateLoanError {
    /// 新しい貸出日時が返却日時より前ではない
    LoanDateNotBeforeReturn,
    /// 新しい貸出日時が前回貸出の返却日時より後ではない
    LoanDateNotAfterPreviousReturn,
    /// 返却日時が貸出日時より後ではない
    ReturnDateNotAfterLoanDate,
    /// 返却日時が次回貸出の貸出日時より前ではない
    ReturnDateNotBeforeNextLoan,
    /// 返却状態にNEWは指定できない
    ReturnStateIsNew,
    /// 返却状態が貸出時の状態より良い
    ReturnStateAboveInitial,
    /// 返却状態が次回貸出の貸出時状態より悪い
    ReturnStateBelowNextInitial,
    /// 次回貸出が存在するため返却を取り消せない
    NextLoanExists,
}

/// 貸出取消のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelLoanError {
    /// 返却済みの貸出は削除できない
    AlreadyReturned,
}

/// 蔵書作成のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateCopiesError {
    /// 作成数が0以下
    NonPositiveCount(i32),
}

/// 蔵書更新のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateCopyError {
    /// 貸出中の蔵書は変更できない
    HasOngoingLoan,
}

/// 会員削除のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteMemberError {
    /// 未返却の貸出がある
    HasUnreturnedLoan,
}
