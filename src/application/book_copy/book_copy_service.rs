use crate::application::ServiceDependencies;
use crate::domain::{
    self, Book, BookCopy, BookCopyId, BookId, Loan,
    commands::{CreateBookCopies, UpdateBookCopy},
};

use super::errors::{BookCopyApplicationError, Result};

async fn load_book(deps: &ServiceDependencies, book_id: BookId) -> Result<Book> {
    deps.book_copy_repository
        .find_book_by_id(book_id)
        .await
        .map_err(BookCopyApplicationError::RepositoryError)?
        .ok_or_else(|| BookCopyApplicationError::NotFound("Unknown book.".to_string()))
}

/// 書籍に属する蔵書を取得する
///
/// 蔵書が存在しても別の書籍に属していれば見つからない扱いにする。
async fn load_copy_of_book(
    deps: &ServiceDependencies,
    book_id: BookId,
    book_copy_id: BookCopyId,
) -> Result<BookCopy> {
    deps.book_copy_repository
        .find_by_id(book_copy_id)
        .await
        .map_err(BookCopyApplicationError::RepositoryError)?
        .filter(|copy| copy.book_id == book_id)
        .ok_or_else(|| {
            BookCopyApplicationError::NotFound("Unknown book copy in book.".to_string())
        })
}

/// 書籍の蔵書をまとめて作成する
///
/// ビジネスルール：
/// - 作成数は1以上
/// - 書籍が存在すること
/// - 状態の指定がなければ NEW
///
/// 作成した蔵書は1つのトランザクションで保存する。
pub async fn create_book_copies(
    deps: &ServiceDependencies,
    cmd: CreateBookCopies,
) -> Result<Vec<BookCopy>> {
    // 作成数の検証は書籍の存在確認より先
    if cmd.num_copies <= 0 {
        return Err(domain::CreateCopiesError::NonPositiveCount(cmd.num_copies).into());
    }

    let book = load_book(deps, cmd.book_id).await?;
    let copies = domain::create_copies(&book, cmd.num_copies, cmd.initial_state)?;

    deps.book_copy_repository
        .save_all(copies.clone())
        .await
        .map_err(BookCopyApplicationError::RepositoryError)?;

    tracing::info!(book_id = %book.id.value(), count = copies.len(), "book copies created");
    Ok(copies)
}

/// 書籍の蔵書を取得する
pub async fn get_book_copy(
    deps: &ServiceDependencies,
    book_id: BookId,
    book_copy_id: BookCopyId,
) -> Result<BookCopy> {
    load_copy_of_book(deps, book_id, book_copy_id).await
}

/// 蔵書の状態・除籍フラグを更新する
///
/// 貸出中の蔵書は変更できない。値が変わらなければ保存しない。
///
/// # 戻り値
/// 更新後の蔵書（変更がなければ現在の蔵書）
pub async fn update_book_copy(deps: &ServiceDependencies, cmd: UpdateBookCopy) -> Result<BookCopy> {
    let patch = cmd.patch.ok_or_else(|| {
        BookCopyApplicationError::InvalidArgument(
            "Missing book id or book copy id or book copy information.".to_string(),
        )
    })?;

    let copy = load_copy_of_book(deps, cmd.book_id, cmd.book_copy_id).await?;

    let Some(updated) = domain::update_copy(&copy, &patch)? else {
        return Ok(copy);
    };

    deps.book_copy_repository
        .save(updated.clone())
        .await
        .map_err(BookCopyApplicationError::RepositoryError)?;

    tracing::info!(
        book_copy_id = %updated.id.value(),
        state = ?updated.state,
        removed = updated.removed,
        "book copy updated"
    );
    Ok(updated)
}

/// 蔵書の全貸出を貸出日時の降順（新しい順）で取得する
pub async fn get_book_copy_loans(
    deps: &ServiceDependencies,
    book_id: BookId,
    book_copy_id: BookCopyId,
) -> Result<Vec<Loan>> {
    let copy = load_copy_of_book(deps, book_id, book_copy_id).await?;

    let mut loans = deps
        .loan_repository
        .find_by_book_copy_id(copy.id)
        .await
        .map_err(BookCopyApplicationError::RepositoryError)?;
    loans.sort_by(|a, b| b.loan_date_time.cmp(&a.loan_date_time));

    Ok(loans)
}
