use crate::application::{
    book_copy::BookCopyApplicationError, loan::LoanApplicationError,
    member::MemberApplicationError,
};
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーをラップし、HTTPレスポンスへのマッピングを提供する。
#[derive(Debug)]
pub enum ApiError {
    Loan(LoanApplicationError),
    BookCopy(BookCopyApplicationError),
    Member(MemberApplicationError),
    /// リクエストボディをJSONとして解釈できない
    InvalidBody(String),
}

impl From<LoanApplicationError> for ApiError {
    fn from(err: LoanApplicationError) -> Self {
        ApiError::Loan(err)
    }
}

impl From<BookCopyApplicationError> for ApiError {
    fn from(err: BookCopyApplicationError) -> Self {
        ApiError::BookCopy(err)
    }
}

impl From<MemberApplicationError> for ApiError {
    fn from(err: MemberApplicationError) -> Self {
        ApiError::Member(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

/// 内部エラーの詳細はログに記録し、クライアントには一般的なメッセージのみを返す
fn repository_error(
    e: &(dyn std::error::Error + Send + Sync),
) -> (StatusCode, &'static str, String) {
    tracing::error!("Repository error: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "REPOSITORY_ERROR",
        "An unexpected error occurred".to_string(),
    )
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            // 400 Bad Request - 入力不正、時系列・状態の制約違反
            ApiError::Loan(LoanApplicationError::InvalidArgument(msg))
            | ApiError::BookCopy(BookCopyApplicationError::InvalidArgument(msg)) => {
                (StatusCode::BAD_REQUEST, "INVALID_ARGUMENT", msg)
            }
            ApiError::Loan(LoanApplicationError::InvalidLoanDate(msg)) => {
                (StatusCode::BAD_REQUEST, "INVALID_LOAN_DATE", msg)
            }
            ApiError::Loan(LoanApplicationError::InvalidReturnDate(msg)) => {
                (StatusCode::BAD_REQUEST, "INVALID_RETURN_DATE", msg)
            }
            ApiError::Loan(LoanApplicationError::InvalidReturnState(msg)) => {
                (StatusCode::BAD_REQUEST, "INVALID_RETURN_STATE", msg)
            }
            ApiError::InvalidBody(msg) => (StatusCode::BAD_REQUEST, "INVALID_BODY", msg),

            // 404 Not Found - リクエストされたリソースが存在しない
            ApiError::Loan(LoanApplicationError::NotFound(msg))
            | ApiError::BookCopy(BookCopyApplicationError::NotFound(msg))
            | ApiError::Member(MemberApplicationError::NotFound(msg)) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", msg)
            }

            // 409 Conflict - 現在の状態では受け付けられない
            ApiError::Loan(LoanApplicationError::LoanNotAllowed(msg)) => {
                (StatusCode::CONFLICT, "LOAN_NOT_ALLOWED", msg)
            }
            ApiError::BookCopy(BookCopyApplicationError::HasOngoingLoan(msg)) => {
                (StatusCode::CONFLICT, "HAS_ONGOING_LOAN", msg)
            }
            ApiError::Member(MemberApplicationError::HasUnreturnedLoan(msg)) => {
                (StatusCode::CONFLICT, "MEMBER_HAS_UNRETURNED_LOAN", msg)
            }

            // 500 Internal Server Error - システム障害
            ApiError::Loan(LoanApplicationError::RepositoryError(e))
            | ApiError::BookCopy(BookCopyApplicationError::RepositoryError(e))
            | ApiError::Member(MemberApplicationError::RepositoryError(e)) => {
                repository_error(e.as_ref())
            }
        };

        let body = Json(ErrorResponse::new(error_type, message));
        (status, body).into_response()
    }
}
