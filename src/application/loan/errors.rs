use thiserror::Error;

use crate::domain::{CancelLoanError, CreateLoanError, UpdateLoanError};

/// 貸出管理アプリケーション層のエラー
///
/// リポジトリエラー以外はすべて呼び出し側の入力に起因し、再試行しても結果は変わらない。
#[derive(Debug, Error)]
pub enum LoanApplicationError {
    /// 入力が構造的に不正（必須項目の欠落、ID不一致など）
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// 参照されたエンティティが存在しない
    #[error("Not found: {0}")]
    NotFound(String),

    /// ビジネスルールにより貸出できない
    #[error("Loan not allowed: {0}")]
    LoanNotAllowed(String),

    /// 貸出日時が時系列の制約に違反
    #[error("Invalid loan date: {0}")]
    InvalidLoanDate(String),

    /// 返却日時が時系列の制約に違反
    #[error("Invalid return date: {0}")]
    InvalidReturnDate(String),

    /// 返却状態が状態の順序制約に違反
    #[error("Invalid return state: {0}")]
    InvalidReturnState(String),

    /// リポジトリのエラー
    #[error("Repository error")]
    RepositoryError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<CreateLoanError> for LoanApplicationError {
    fn from(err: CreateLoanError) -> Self {
        match err {
            CreateLoanError::MinorCannotBorrowAdultBook => LoanApplicationError::LoanNotAllowed(
                "Member is minor while book is for adult".to_string(),
            ),
            CreateLoanError::CopyNotAvailable => LoanApplicationError::LoanNotAllowed(
                "Book copy is not available or has been removed".to_string(),
            ),
            CreateLoanError::LoanDateNotAfterPreviousReturn => {
                LoanApplicationError::InvalidArgument(
                    "Cannot create a loan with a date before the return date of a previous loan"
                        .to_string(),
                )
            }
            CreateLoanError::DuplicateLoanDateTime => LoanApplicationError::InvalidArgument(
                "A loan already exists for this book copy at the same date".to_string(),
            ),
        }
    }
}

impl From<UpdateLoanError> for LoanApplicationError {
    fn from(err: UpdateLoanError) -> Self {
        use LoanApplicationError::*;

        match err {
            UpdateLoanError::LoanDateNotBeforeReturn => InvalidLoanDate(
                "Loan date must be before the return date of the loan".to_string(),
            ),
            UpdateLoanError::LoanDateNotAfterPreviousReturn => InvalidLoanDate(
                "Loan date must be after the return date of the previous loan".to_string(),
            ),
            UpdateLoanError::ReturnDateNotAfterLoanDate => InvalidReturnDate(
                "Return date must be after the date of the loan".to_string(),
            ),
            UpdateLoanError::ReturnDateNotBeforeNextLoan => InvalidReturnDate(
                "Return date must be before the date of the next loan".to_string(),
            ),
            UpdateLoanError::ReturnStateIsNew => {
                InvalidReturnState("Return state cannot be NEW".to_string())
            }
            UpdateLoanError::ReturnStateAboveInitial => InvalidReturnState(
                "Return state cannot be better than the initial state of the loan".to_string(),
            ),
            UpdateLoanError::ReturnStateBelowNextInitial => InvalidReturnState(
                "Return state cannot be worse than the initial state of the next loan"
                    .to_string(),
            ),
            UpdateLoanError::NextLoanExists => InvalidArgument(
                "Cannot reset the return of a loan followed by another loan".to_string(),
            ),
        }
    }
}

impl From<CancelLoanError> for LoanApplicationError {
    fn from(err: CancelLoanError) -> Self {
        match err {
            CancelLoanError::AlreadyReturned => LoanApplicationError::InvalidArgument(
                "Cannot delete already returned loan".to_string(),
            ),
        }
    }
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, LoanApplicationError>;
