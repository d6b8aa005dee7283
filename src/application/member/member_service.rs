use crate::application::ServiceDependencies;
use crate::domain::{self, Member, MemberId};

use super::errors::{MemberApplicationError, Result};

async fn load_member(deps: &ServiceDependencies, member_id: MemberId) -> Result<Member> {
    deps.member_repository
        .find_by_id(member_id)
        .await
        .map_err(MemberApplicationError::RepositoryError)?
        .ok_or_else(|| MemberApplicationError::NotFound("Unknown member.".to_string()))
}

/// IDで会員を取得する
pub async fn get_member_by_id(deps: &ServiceDependencies, member_id: MemberId) -> Result<Member> {
    load_member(deps, member_id).await
}

/// 会員を削除する
///
/// 未返却の貸出がある会員は削除できない。
/// 返却済みの貸出は蔵書の履歴として残す。
pub async fn delete_member_by_id(deps: &ServiceDependencies, member_id: MemberId) -> Result<()> {
    let member = deps
        .member_repository
        .find_by_id(member_id)
        .await
        .map_err(MemberApplicationError::RepositoryError)?
        .ok_or_else(|| MemberApplicationError::NotFound("Unknown member to delete.".to_string()))?;

    let loans = deps
        .loan_repository
        .find_by_member_id(member.id)
        .await
        .map_err(MemberApplicationError::RepositoryError)?;

    domain::member::check_member_deletion(&loans)
        .inspect_err(|e| tracing::debug!(member_id = %member.id.value(), ?e, "deletion refused"))?;

    deps.member_repository
        .delete_by_id(member.id)
        .await
        .map_err(MemberApplicationError::RepositoryError)?;

    tracing::info!(member_id = %member.id.value(), kept_loans = loans.len(), "member deleted");
    Ok(())
}
