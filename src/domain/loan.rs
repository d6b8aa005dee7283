use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use super::{
    BookCategory, BookCopy, BookCopyId, CancelLoanError, Condition, CreateLoanError, LoanId,
    Member, MemberId, UpdateLoanError,
    chronology::{most_ancient_next_loan, most_recent_loan, most_recent_previous_loan},
    copy_sync::reconcile,
    eligibility::check_loan_eligibility,
};

/// 返却情報
///
/// 返却日時と返却状態は必ず一緒に設定・解除される。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanReturn {
    pub date_time: DateTime<Utc>,
    pub state: Condition,
}

/// Loan集約 - 1人の会員による1冊の蔵書の1回の貸出
///
/// 不変条件：
/// - `returned.date_time > loan_date_time`
/// - `returned.state <= initial_state` かつ `returned.state != NEW`
/// - 同じ蔵書の貸出は期間が重ならない
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    pub id: LoanId,
    pub member_id: MemberId,
    pub book_copy_id: BookCopyId,
    pub loan_date_time: DateTime<Utc>,
    /// 貸出時点の蔵書の状態
    pub initial_state: Condition,
    pub returned: Option<LoanReturn>,
}

impl Loan {
    pub fn return_date_time(&self) -> Option<DateTime<Utc>> {
        self.returned.map(|r| r.date_time)
    }

    pub fn return_state(&self) -> Option<Condition> {
        self.returned.map(|r| r.state)
    }

    pub fn is_returned(&self) -> bool {
        self.returned.is_some()
    }
}

/// 貸出の部分更新
///
/// 参照されるのはこの3項目のみ。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanPatch {
    pub loan_date_time: Option<DateTime<Utc>>,
    pub return_date_time: Option<DateTime<Utc>>,
    pub return_state: Option<Condition>,
}

/// 更新の結果、永続化が必要なエンティティ
///
/// 値が`Some`のものだけを保存する。両方`None`なら書き込みは不要。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoanChanges {
    pub loan: Option<Loan>,
    pub copy: Option<BookCopy>,
}

impl LoanChanges {
    pub fn is_empty(&self) -> bool {
        self.loan.is_none() && self.copy.is_none()
    }
}

/// 日時を秒精度に丸める（秒未満を切り捨て）
pub fn truncate_to_seconds(date_time: DateTime<Utc>) -> DateTime<Utc> {
    date_time.trunc_subsecs(0)
}

/// 純粋関数：貸出を作成する
///
/// ビジネスルール：
/// - 貸出可否（未成年・成人向け、貸出中・除籍）を満たすこと
/// - 日時が指定された場合、最新の貸出の返却日時より後であること
/// - 貸出時状態は蔵書の現在の状態
/// - 蔵書は貸出不可になる
///
/// `history`は蔵書の全貸出。`now`は日時未指定時の貸出日時と年齢計算に使う。
/// 副作用なし。新しいLoanと更新後の蔵書を返す。
pub fn open_loan(
    member: &Member,
    copy: &BookCopy,
    categories: &[BookCategory],
    history: &[Loan],
    requested_date_time: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Result<(Loan, BookCopy), CreateLoanError> {
    check_loan_eligibility(member, copy, categories, now.date_naive())?;

    let loan_date_time = match requested_date_time.map(truncate_to_seconds) {
        Some(requested) => {
            if let Some(latest) = most_recent_loan(history) {
                match latest.returned {
                    Some(r) if r.date_time < requested => {}
                    _ => return Err(CreateLoanError::LoanDateNotAfterPreviousReturn),
                }
            }
            requested
        }
        None => truncate_to_seconds(now),
    };

    if history.iter().any(|l| l.loan_date_time == loan_date_time) {
        return Err(CreateLoanError::DuplicateLoanDateTime);
    }

    let loan = Loan {
        id: LoanId::new(),
        member_id: member.id,
        book_copy_id: copy.id,
        loan_date_time,
        initial_state: copy.state,
        returned: None,
    };

    let copy = BookCopy {
        available: false,
        ..copy.clone()
    };

    Ok((loan, copy))
}

/// 純粋関数：貸出を更新する
///
/// 適用順序：
/// 1. 貸出日時の変更（他の変更と独立）
/// 2. 返却関連は次のうち1つだけ：
///    - 未返却 + 返却日時と状態の両方指定 → 返却（片方だけなら何もしない）
///    - 返却済み + どちらも未指定 → 返却の取消
///    - 返却済み → 返却日時・返却状態をそれぞれ変更
///
/// すべての検証は作業用のコピーに対して行い、エラー時には何も反映されない。
pub fn update_loan(
    loan: &Loan,
    copy: &BookCopy,
    history: &[Loan],
    patch: &LoanPatch,
) -> Result<LoanChanges, UpdateLoanError> {
    let mut updated = loan.clone();
    let mut copy_update = None;

    if let Some(new_date) = patch.loan_date_time.map(truncate_to_seconds) {
        if new_date != updated.loan_date_time {
            change_loan_date(&mut updated, history, new_date)?;
        }
    }

    let return_date = patch.return_date_time.map(truncate_to_seconds);
    match (updated.returned, return_date, patch.return_state) {
        (None, Some(date), Some(state)) => {
            copy_update = set_return(&mut updated, copy, date, state)?;
        }
        // 返却日時と返却状態が揃っていなければ返却は登録しない
        (None, _, _) => {}
        (Some(_), None, None) => {
            copy_update = reset_return(&mut updated, copy, history)?;
        }
        (Some(current), date, state) => {
            let next = most_ancient_next_loan(&updated, history);
            if let Some(date) = date.filter(|d| *d != current.date_time) {
                change_return_date(&mut updated, next, date)?;
            }
            if let Some(state) = state.filter(|s| *s != current.state) {
                copy_update = change_return_state(&mut updated, copy, next, state)?;
            }
        }
    }

    let loan_update = (updated != *loan).then_some(updated);
    Ok(LoanChanges {
        loan: loan_update,
        copy: copy_update,
    })
}

/// 純粋関数：貸出を取り消す
///
/// 未返却の貸出のみ取り消せる。蔵書は貸出可能に戻る。
pub fn cancel_loan(loan: &Loan, copy: &BookCopy) -> Result<BookCopy, CancelLoanError> {
    if loan.is_returned() {
        return Err(CancelLoanError::AlreadyReturned);
    }

    Ok(BookCopy {
        available: true,
        ..copy.clone()
    })
}

fn change_loan_date(
    loan: &mut Loan,
    history: &[Loan],
    new_date: DateTime<Utc>,
) -> Result<(), UpdateLoanError> {
    // 返却済みなら 新しい貸出日時 < 返却日時
    if let Some(r) = loan.returned {
        if new_date >= r.date_time {
            return Err(UpdateLoanError::LoanDateNotBeforeReturn);
        }
    }

    // 前回貸出があれば 前回の返却日時 < 新しい貸出日時
    if let Some(previous) = most_recent_previous_loan(loan, history) {
        match previous.returned {
            Some(r) if r.date_time < new_date => {}
            _ => return Err(UpdateLoanError::LoanDateNotAfterPreviousReturn),
        }
    }

    loan.loan_date_time = new_date;
    Ok(())
}

fn set_return(
    loan: &mut Loan,
    copy: &BookCopy,
    date: DateTime<Utc>,
    state: Condition,
) -> Result<Option<BookCopy>, UpdateLoanError> {
    if date <= loan.loan_date_time {
        return Err(UpdateLoanError::ReturnDateNotAfterLoanDate);
    }
    check_return_state(loan, state)?;

    loan.returned = Some(LoanReturn {
        date_time: date,
        state,
    });
    Ok(reconcile(copy, true, Some(state), Some(true)))
}

fn reset_return(
    loan: &mut Loan,
    copy: &BookCopy,
    history: &[Loan],
) -> Result<Option<BookCopy>, UpdateLoanError> {
    if most_ancient_next_loan(loan, history).is_some() {
        return Err(UpdateLoanError::NextLoanExists);
    }

    loan.returned = None;
    Ok(reconcile(copy, true, Some(loan.initial_state), Some(false)))
}

fn change_return_date(
    loan: &mut Loan,
    next: Option<&Loan>,
    date: DateTime<Utc>,
) -> Result<(), UpdateLoanError> {
    if date <= loan.loan_date_time {
        return Err(UpdateLoanError::ReturnDateNotAfterLoanDate);
    }
    if next.is_some_and(|n| date >= n.loan_date_time) {
        return Err(UpdateLoanError::ReturnDateNotBeforeNextLoan);
    }

    if let Some(r) = loan.returned.as_mut() {
        r.date_time = date;
    }
    Ok(())
}

fn change_return_state(
    loan: &mut Loan,
    copy: &BookCopy,
    next: Option<&Loan>,
    state: Condition,
) -> Result<Option<BookCopy>, UpdateLoanError> {
    check_return_state(loan, state)?;
    if next.is_some_and(|n| state < n.initial_state) {
        return Err(UpdateLoanError::ReturnStateBelowNextInitial);
    }

    if let Some(r) = loan.returned.as_mut() {
        r.state = state;
    }
    // 次の貸出がある場合、蔵書の現在の状態はそちらが決める
    Ok(reconcile(copy, next.is_none(), Some(state), None))
}

fn check_return_state(loan: &Loan, state: Condition) -> Result<(), UpdateLoanError> {
    if state == Condition::New {
        return Err(UpdateLoanError::ReturnStateIsNew);
    }
    if state > loan.initial_state {
        return Err(UpdateLoanError::ReturnStateAboveInitial);
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{DateTime, NaiveDate, Utc};

    use super::{Loan, LoanReturn};
    use crate::domain::{BookCopyId, Condition, LoanId, MemberId};

    /// "YYYY-MM-DD" をその日の 00:00:00 UTC として読む
    pub fn parse(date: &str) -> DateTime<Utc> {
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc()
    }

    pub fn open_loan_at(copy_id: BookCopyId, loan_date: &str, initial: Condition) -> Loan {
        Loan {
            id: LoanId::new(),
            member_id: MemberId::new(),
            book_copy_id: copy_id,
            loan_date_time: parse(loan_date),
            initial_state: initial,
            returned: None,
        }
    }

    pub fn returned_loan(
        copy_id: BookCopyId,
        loan_date: &str,
        initial: Condition,
        return_date: &str,
        return_state: Condition,
    ) -> Loan {
        Loan {
            returned: Some(LoanReturn {
                date_time: parse(return_date),
                state: return_state,
            }),
            ..open_loan_at(copy_id, loan_date, initial)
        }
    }
}
