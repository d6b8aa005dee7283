pub mod book_copy_repository;
pub mod loan_repository;
pub mod member_repository;

use crate::domain::Condition;

// パブリックに型を再エクスポート
pub use book_copy_repository::BookCopyRepository as PostgresBookCopyRepository;
pub use loan_repository::LoanRepository as PostgresLoanRepository;
pub use member_repository::MemberRepository as PostgresMemberRepository;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 不正な行データをエラーに変換する
fn invalid_data(message: String) -> BoxError {
    Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, message))
}

/// SMALLINT のランクを状態に変換する
fn condition_from_column(rank: i16) -> Result<Condition, BoxError> {
    Condition::from_rank(i32::from(rank))
        .map_err(|e| invalid_data(format!("invalid condition rank: {:?}", e)))
}

fn condition_to_column(condition: Condition) -> i16 {
    i16::from(condition.rank())
}
