use crate::domain::{
    Book, BookCategory, BookCopy, BookCopyId, BookId, CategoryId, Loan, LoanId, Member, MemberId,
};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// ストアの中身（1つのロックで守られる）
#[derive(Default)]
pub(super) struct Tables {
    pub(super) loans: HashMap<LoanId, Loan>,
    pub(super) copies: HashMap<BookCopyId, BookCopy>,
    pub(super) books: HashMap<BookId, Book>,
    pub(super) categories: HashMap<CategoryId, BookCategory>,
    pub(super) members: HashMap<MemberId, Member>,
    /// 設定されている間、蔵書の書き込みはこのメッセージで失敗する
    pub(super) copy_write_error: Option<String>,
    pub(super) loan_saves: usize,
    pub(super) loan_deletes: usize,
    pub(super) copy_saves: usize,
    pub(super) member_deletes: usize,
}

impl Tables {
    /// 蔵書を書き込めるか確認する（書き込み前に呼ぶ）
    pub(super) fn check_copy_write(&self) -> Result<(), BoxError> {
        match &self.copy_write_error {
            Some(message) => Err(message.clone().into()),
            None => Ok(()),
        }
    }

    pub(super) fn write_copy(&mut self, copy: BookCopy) {
        self.copy_saves += 1;
        self.copies.insert(copy.id, copy);
    }

    pub(super) fn write_loan(&mut self, loan: Loan) {
        self.loan_saves += 1;
        self.loans.insert(loan.id, loan);
    }
}

/// インメモリのストア
///
/// 各リポジトリは同じストアを共有するため、貸出と蔵書の書き込みを
/// 1つのロックの中でまとめて行える。
/// 書き込み回数を数えるため、テストで「書き込みが起きなかったこと」を確認できる。
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(super) fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ========================================================================
    // 初期データ（書き込み回数には数えない）
    // ========================================================================

    pub fn add_member(&self, member: Member) {
        self.tables().members.insert(member.id, member);
    }

    pub fn add_category(&self, category: BookCategory) {
        self.tables().categories.insert(category.id, category);
    }

    pub fn add_book(&self, book: Book) {
        self.tables().books.insert(book.id, book);
    }

    pub fn add_copy(&self, copy: BookCopy) {
        self.tables().copies.insert(copy.id, copy);
    }

    pub fn add_loan(&self, loan: Loan) {
        self.tables().loans.insert(loan.id, loan);
    }

    // ========================================================================
    // 現在の内容
    // ========================================================================

    pub fn loan(&self, loan_id: LoanId) -> Option<Loan> {
        self.tables().loans.get(&loan_id).cloned()
    }

    pub fn copy(&self, book_copy_id: BookCopyId) -> Option<BookCopy> {
        self.tables().copies.get(&book_copy_id).cloned()
    }

    pub fn member(&self, member_id: MemberId) -> Option<Member> {
        self.tables().members.get(&member_id).cloned()
    }

    pub fn copies_of_book(&self, book_id: BookId) -> Vec<BookCopy> {
        self.tables()
            .copies
            .values()
            .filter(|c| c.book_id == book_id)
            .cloned()
            .collect()
    }

    pub fn loan_save_count(&self) -> usize {
        self.tables().loan_saves
    }

    pub fn loan_delete_count(&self) -> usize {
        self.tables().loan_deletes
    }

    pub fn copy_save_count(&self) -> usize {
        self.tables().copy_saves
    }

    pub fn member_delete_count(&self) -> usize {
        self.tables().member_deletes
    }

    /// 貸出・蔵書・会員への書き込みの合計
    pub fn write_count(&self) -> usize {
        let tables = self.tables();
        tables.loan_saves + tables.loan_deletes + tables.copy_saves + tables.member_deletes
    }

    /// 以降の蔵書の書き込みを失敗させる（`None`で解除）
    pub fn fail_copy_writes(&self, message: Option<&str>) {
        self.tables().copy_write_error = message.map(str::to_string);
    }
}
