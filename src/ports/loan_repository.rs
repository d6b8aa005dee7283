use crate::domain::{BookCopy, BookCopyId, Loan, LoanChanges, LoanId, MemberId};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 貸出リポジトリポート
///
/// 貸出の永続化と取得を抽象化する。
/// 蔵書ごとの前後関係はドメイン層の`chronology`が決めるため、
/// ここでは順序を保証しない（`find_all`を除く）。
///
/// 貸出の書き込みは蔵書の書き込みと必ず同じトランザクションで行う。
#[async_trait]
pub trait LoanRepository: Send + Sync {
    /// IDで貸出を取得する
    async fn find_by_id(&self, loan_id: LoanId) -> Result<Option<Loan>>;

    /// 貸出と蔵書のうち`Some`のものを1つのトランザクションで保存する
    ///
    /// どちらかの書き込みに失敗した場合、何も保存されない。
    async fn save_changes(&self, changes: LoanChanges) -> Result<()>;

    /// 貸出の削除と蔵書の保存を1つのトランザクションで行う
    async fn delete_with_copy(&self, loan_id: LoanId, copy: BookCopy) -> Result<()>;

    /// 蔵書の全貸出を取得する（順不同）
    async fn find_by_book_copy_id(&self, book_copy_id: BookCopyId) -> Result<Vec<Loan>>;

    /// 会員の全貸出を取得する（順不同）
    async fn find_by_member_id(&self, member_id: MemberId) -> Result<Vec<Loan>>;

    /// 全貸出を貸出日時の降順で取得する
    async fn find_all(&self) -> Result<Vec<Loan>>;
}
