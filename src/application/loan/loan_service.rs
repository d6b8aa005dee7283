use crate::domain::{
    self, BookCategory, BookCopy, BookCopyId, BookId, Loan, LoanChanges, LoanId, Member, MemberId,
    chronology,
    commands::{CreateLoan, UpdateLoan},
};
use crate::application::ServiceDependencies;

use super::errors::{LoanApplicationError, Result};

/// 貸出の前後関係（診断用）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanTimeline {
    pub loan: Loan,
    pub previous: Option<Loan>,
    pub next: Option<Loan>,
    pub most_recent: Option<Loan>,
}

async fn load_loan(deps: &ServiceDependencies, loan_id: LoanId) -> Result<Loan> {
    deps.loan_repository
        .find_by_id(loan_id)
        .await
        .map_err(LoanApplicationError::RepositoryError)?
        .ok_or_else(|| LoanApplicationError::NotFound(format!("Unknown loan {}", loan_id.value())))
}

async fn load_copy(deps: &ServiceDependencies, book_copy_id: BookCopyId) -> Result<BookCopy> {
    deps.book_copy_repository
        .find_by_id(book_copy_id)
        .await
        .map_err(LoanApplicationError::RepositoryError)?
        .ok_or_else(|| {
            LoanApplicationError::NotFound(format!("Unknown book copy {}", book_copy_id.value()))
        })
}

async fn load_member(deps: &ServiceDependencies, member_id: MemberId) -> Result<Member> {
    deps.member_repository
        .find_by_id(member_id)
        .await
        .map_err(LoanApplicationError::RepositoryError)?
        .ok_or_else(|| {
            LoanApplicationError::NotFound(format!("Unknown member {}", member_id.value()))
        })
}

async fn load_categories(deps: &ServiceDependencies, book_id: BookId) -> Result<Vec<BookCategory>> {
    deps.book_copy_repository
        .find_categories_for_book(book_id)
        .await
        .map_err(LoanApplicationError::RepositoryError)
}

/// 蔵書の全貸出履歴（順不同）
async fn load_history(deps: &ServiceDependencies, book_copy_id: BookCopyId) -> Result<Vec<Loan>> {
    deps.loan_repository
        .find_by_book_copy_id(book_copy_id)
        .await
        .map_err(LoanApplicationError::RepositoryError)
}

/// 貸出と蔵書の変更を1つのトランザクションで保存する
async fn save_changes(deps: &ServiceDependencies, changes: LoanChanges) -> Result<()> {
    deps.loan_repository
        .save_changes(changes)
        .await
        .map_err(LoanApplicationError::RepositoryError)
}

/// 蔵書を貸し出す
///
/// ビジネスルール：
/// - 会員と蔵書のIDが指定されていること
/// - 会員と蔵書が存在すること
/// - 未成年の会員に成人向けの書籍を貸し出さないこと
/// - 蔵書が貸出可能で除籍されていないこと
/// - 日時指定がある場合、その蔵書の最新の貸出の返却日時より後であること
///
/// 貸出と蔵書（貸出不可になる）を1つのトランザクションで保存する。
///
/// # 戻り値
/// 作成された貸出
pub async fn create_loan(deps: &ServiceDependencies, cmd: CreateLoan) -> Result<Loan> {
    let (Some(member_id), Some(book_copy_id)) = (cmd.member_id, cmd.book_copy_id) else {
        return Err(LoanApplicationError::InvalidArgument(
            "Missing member or book copy to create loan".to_string(),
        ));
    };
    tracing::debug!(
        member_id = %member_id.value(),
        book_copy_id = %book_copy_id.value(),
        "creating loan"
    );

    // 1. 会員と蔵書を取得
    let (member, copy) = futures::try_join!(
        load_member(deps, member_id),
        load_copy(deps, book_copy_id)
    )?;

    // 2. 貸出可否の判定材料（カテゴリ、貸出履歴）を取得
    let (categories, history) = futures::try_join!(
        load_categories(deps, copy.book_id),
        load_history(deps, copy.id)
    )?;

    // 3. ドメイン層の純粋関数を呼び出し
    let (loan, copy) = domain::loan::open_loan(
        &member,
        &copy,
        &categories,
        &history,
        cmd.loan_date_time,
        deps.clock.now(),
    )
    .inspect_err(|e| tracing::debug!(?e, "loan creation rejected"))?;

    // 4. 貸出と蔵書をまとめて保存
    save_changes(
        deps,
        LoanChanges {
            loan: Some(loan.clone()),
            copy: Some(copy),
        },
    )
    .await?;

    tracing::info!(
        loan_id = %loan.id.value(),
        book_copy_id = %loan.book_copy_id.value(),
        loan_date_time = %loan.loan_date_time,
        "loan created"
    );

    Ok(loan)
}

/// IDで貸出を取得する
pub async fn get_loan_by_id(deps: &ServiceDependencies, loan_id: LoanId) -> Result<Loan> {
    load_loan(deps, loan_id).await
}

/// 全貸出を貸出日時の降順で取得する
pub async fn list_loans(deps: &ServiceDependencies) -> Result<Vec<Loan>> {
    deps.loan_repository
        .find_all()
        .await
        .map_err(LoanApplicationError::RepositoryError)
}

/// 貸出を更新する
///
/// 貸出日時の修正、返却の登録、返却日時・返却状態の修正、返却の取消を行う。
/// 規則の詳細は`domain::loan::update_loan`を参照。
///
/// 貸出は値が変わった場合のみ、蔵書も値が変わった場合のみ保存する。
/// 検証に失敗した場合は何も保存しない。
///
/// # 戻り値
/// 更新後の貸出（変更がなければ現在の貸出）
pub async fn update_loan(deps: &ServiceDependencies, cmd: UpdateLoan) -> Result<Loan> {
    let patch = cmd.patch.ok_or_else(|| {
        LoanApplicationError::InvalidArgument("Missing loan to update".to_string())
    })?;

    // 1. 貸出、蔵書、蔵書の貸出履歴を取得
    let loan = load_loan(deps, cmd.loan_id).await?;
    let (copy, history) = futures::try_join!(
        load_copy(deps, loan.book_copy_id),
        load_history(deps, loan.book_copy_id)
    )?;

    // 2. ドメイン層の純粋関数を呼び出し
    let changes = domain::loan::update_loan(&loan, &copy, &history, &patch)
        .inspect_err(|e| tracing::debug!(loan_id = %loan.id.value(), ?e, "loan update rejected"))?;

    if changes.is_empty() {
        return Ok(loan);
    }

    // 3. 変更があったものだけを1つのトランザクションで保存
    let loan_written = changes.loan.is_some();
    let copy_written = changes.copy.is_some();
    let result = changes.loan.clone().unwrap_or(loan);
    save_changes(deps, changes).await?;

    tracing::info!(loan_id = %result.id.value(), loan_written, copy_written, "loan updated");

    Ok(result)
}

/// 貸出を取り消す（削除する）
///
/// 返却済みの貸出は削除できない。
/// 貸出の削除と、貸出可能に戻した蔵書の保存は1つのトランザクションで行う。
pub async fn delete_loan_by_id(deps: &ServiceDependencies, loan_id: LoanId) -> Result<()> {
    let loan = load_loan(deps, loan_id).await?;
    let copy = load_copy(deps, loan.book_copy_id).await?;

    let copy = domain::loan::cancel_loan(&loan, &copy)?;

    deps.loan_repository
        .delete_with_copy(loan_id, copy)
        .await
        .map_err(LoanApplicationError::RepositoryError)?;

    tracing::info!(loan_id = %loan_id.value(), "loan cancelled");
    Ok(())
}

/// 貸出の前後の貸出と、蔵書の最新の貸出を取得する（診断用）
pub async fn loan_timeline(deps: &ServiceDependencies, loan_id: LoanId) -> Result<LoanTimeline> {
    let loan = load_loan(deps, loan_id).await?;
    let history = load_history(deps, loan.book_copy_id).await?;

    Ok(LoanTimeline {
        previous: chronology::most_recent_previous_loan(&loan, &history).cloned(),
        next: chronology::most_ancient_next_loan(&loan, &history).cloned(),
        most_recent: chronology::most_recent_loan(&history).cloned(),
        loan,
    })
}
