use thiserror::Error;

use crate::domain::DeleteMemberError;

/// 会員管理アプリケーション層のエラー
#[derive(Debug, Error)]
pub enum MemberApplicationError {
    /// 会員が存在しない
    #[error("Not found: {0}")]
    NotFound(String),

    /// 未返却の貸出がある会員は削除できない
    #[error("Member has unreturned loan: {0}")]
    HasUnreturnedLoan(String),

    /// リポジトリのエラー
    #[error("Repository error")]
    RepositoryError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<DeleteMemberError> for MemberApplicationError {
    fn from(err: DeleteMemberError) -> Self {
        match err {
            DeleteMemberError::HasUnreturnedLoan => MemberApplicationError::HasUnreturnedLoan(
                "The Member has unreturned loan".to_string(),
            ),
        }
    }
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, MemberApplicationError>;
