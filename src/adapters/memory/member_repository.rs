use crate::domain::{Member, MemberId};
use crate::ports::member_repository::{MemberRepository as MemberRepositoryTrait, Result};
use async_trait::async_trait;
use std::sync::Arc;

use super::MemoryStore;

/// MemberRepositoryのインメモリ実装
pub struct MemberRepository {
    store: Arc<MemoryStore>,
}

impl MemberRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MemberRepositoryTrait for MemberRepository {
    async fn find_by_id(&self, member_id: MemberId) -> Result<Option<Member>> {
        Ok(self.store.member(member_id))
    }

    async fn delete_by_id(&self, member_id: MemberId) -> Result<()> {
        let mut tables = self.store.tables();
        tables.member_deletes += 1;
        tables.members.remove(&member_id);
        Ok(())
    }
}
