use crate::domain::{Member, MemberId};
use crate::ports::member_repository::{MemberRepository as MemberRepositoryTrait, Result};
use async_trait::async_trait;
use sqlx::{PgPool, Row};

/// MemberRepositoryのPostgreSQL実装
pub struct MemberRepository {
    pool: PgPool,
}

impl MemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepositoryTrait for MemberRepository {
    async fn find_by_id(&self, member_id: MemberId) -> Result<Option<Member>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, first_name, birthday
            FROM members
            WHERE id = $1
            "#,
        )
        .bind(member_id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| Member {
            id: MemberId::from_uuid(row.get("id")),
            name: row.get("name"),
            first_name: row.get("first_name"),
            birthday: row.get("birthday"),
        }))
    }

    /// 会員を削除する。`loans.member_id`は外部キーではないため貸出は残る。
    async fn delete_by_id(&self, member_id: MemberId) -> Result<()> {
        sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(member_id.value())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
