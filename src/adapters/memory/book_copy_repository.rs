use crate::domain::{Book, BookCategory, BookCopy, BookCopyId, BookId};
use crate::ports::book_copy_repository::{BookCopyRepository as BookCopyRepositoryTrait, Result};
use async_trait::async_trait;
use std::sync::Arc;

use super::MemoryStore;

/// BookCopyRepositoryのインメモリ実装
///
/// 書籍とカテゴリもストアから引き、蔵書から書籍のカテゴリを辿れるようにする。
pub struct BookCopyRepository {
    store: Arc<MemoryStore>,
}

impl BookCopyRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BookCopyRepositoryTrait for BookCopyRepository {
    async fn find_by_id(&self, book_copy_id: BookCopyId) -> Result<Option<BookCopy>> {
        Ok(self.store.copy(book_copy_id))
    }

    async fn save(&self, copy: BookCopy) -> Result<()> {
        let mut tables = self.store.tables();
        tables.check_copy_write()?;
        tables.write_copy(copy);
        Ok(())
    }

    async fn save_all(&self, copies: Vec<BookCopy>) -> Result<()> {
        let mut tables = self.store.tables();
        tables.check_copy_write()?;
        for copy in copies {
            tables.write_copy(copy);
        }
        Ok(())
    }

    async fn find_book_by_id(&self, book_id: BookId) -> Result<Option<Book>> {
        Ok(self.store.tables().books.get(&book_id).cloned())
    }

    /// 未登録の書籍はカテゴリなしとして扱う
    async fn find_categories_for_book(&self, book_id: BookId) -> Result<Vec<BookCategory>> {
        let tables = self.store.tables();
        let Some(book) = tables.books.get(&book_id) else {
            return Ok(Vec::new());
        };
        Ok(book
            .category_ids
            .iter()
            .filter_map(|id| tables.categories.get(id).cloned())
            .collect())
    }
}
