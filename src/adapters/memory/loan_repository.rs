use crate::domain::{BookCopy, BookCopyId, Loan, LoanChanges, LoanId, MemberId};
use crate::ports::loan_repository::{LoanRepository as LoanRepositoryTrait, Result};
use async_trait::async_trait;
use std::sync::Arc;

use super::MemoryStore;

/// LoanRepositoryのインメモリ実装
pub struct LoanRepository {
    store: Arc<MemoryStore>,
}

impl LoanRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl LoanRepositoryTrait for LoanRepository {
    async fn find_by_id(&self, loan_id: LoanId) -> Result<Option<Loan>> {
        Ok(self.store.loan(loan_id))
    }

    /// 書き込み可否を先に確認し、同じロックの中で両方を書き込む
    async fn save_changes(&self, changes: LoanChanges) -> Result<()> {
        let mut tables = self.store.tables();
        if changes.copy.is_some() {
            tables.check_copy_write()?;
        }

        if let Some(loan) = changes.loan {
            tables.write_loan(loan);
        }
        if let Some(copy) = changes.copy {
            tables.write_copy(copy);
        }
        Ok(())
    }

    async fn delete_with_copy(&self, loan_id: LoanId, copy: BookCopy) -> Result<()> {
        let mut tables = self.store.tables();
        tables.check_copy_write()?;

        tables.loan_deletes += 1;
        tables.loans.remove(&loan_id);
        tables.write_copy(copy);
        Ok(())
    }

    async fn find_by_book_copy_id(&self, book_copy_id: BookCopyId) -> Result<Vec<Loan>> {
        Ok(self
            .store
            .tables()
            .loans
            .values()
            .filter(|l| l.book_copy_id == book_copy_id)
            .cloned()
            .collect())
    }

    async fn find_by_member_id(&self, member_id: MemberId) -> Result<Vec<Loan>> {
        Ok(self
            .store
            .tables()
            .loans
            .values()
            .filter(|l| l.member_id == member_id)
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> Result<Vec<Loan>> {
        let mut loans: Vec<Loan> = self.store.tables().loans.values().cloned().collect();
        loans.sort_by(|a, b| b.loan_date_time.cmp(&a.loan_date_time));
        Ok(loans)
    }
}
