use thiserror::Error;

use crate::domain::{CreateCopiesError, UpdateCopyError};

/// 蔵書管理アプリケーション層のエラー
#[derive(Debug, Error)]
pub enum BookCopyApplicationError {
    /// 入力が構造的に不正（作成数が0以下、ID不一致など）
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// 書籍または蔵書が存在しない
    #[error("Not found: {0}")]
    NotFound(String),

    /// 貸出中の蔵書は変更できない
    #[error("Has ongoing loan: {0}")]
    HasOngoingLoan(String),

    /// リポジトリのエラー
    #[error("Repository error")]
    RepositoryError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<CreateCopiesError> for BookCopyApplicationError {
    fn from(err: CreateCopiesError) -> Self {
        match err {
            CreateCopiesError::NonPositiveCount(_) => BookCopyApplicationError::InvalidArgument(
                "numCopies cannot be lower or equal to 0".to_string(),
            ),
        }
    }
}

impl From<UpdateCopyError> for BookCopyApplicationError {
    fn from(err: UpdateCopyError) -> Self {
        match err {
            UpdateCopyError::HasOngoingLoan => BookCopyApplicationError::HasOngoingLoan(
                "Cannot update a book copy that has on going loan".to_string(),
            ),
        }
    }
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, BookCopyApplicationError>;
