use crate::domain::{Author, Book, BookCategory, BookCopy, BookCopyId, BookId, CategoryId};
use crate::ports::book_copy_repository::{BookCopyRepository as BookCopyRepositoryTrait, Result};
use async_trait::async_trait;
use sqlx::{PgConnection, PgPool, Row, postgres::PgRow};

use super::{condition_from_column, condition_to_column, invalid_data};

fn map_row_to_book_copy(row: &PgRow) -> Result<BookCopy> {
    Ok(BookCopy {
        id: BookCopyId::from_uuid(row.get("id")),
        book_id: BookId::from_uuid(row.get("book_id")),
        state: condition_from_column(row.get("state"))?,
        removed: row.get("removed"),
        available: row.get("available"),
    })
}

/// 書籍の行とカテゴリIDからBookを組み立てる
fn map_row_to_book(row: &PgRow, category_ids: Vec<CategoryId>) -> Result<Book> {
    let authors: Vec<Author> = serde_json::from_value(row.get("authors"))?;
    let page_count: i32 = row.get("page_count");

    Ok(Book {
        id: BookId::from_uuid(row.get("id")),
        isbn: row.get("isbn"),
        title: row.get("title"),
        editor: row.get("editor"),
        page_count: u32::try_from(page_count)
            .map_err(|_| invalid_data(format!("invalid page count: {page_count}")))?,
        publication_year: row.get("publication_year"),
        authors,
        category_ids,
    })
}

/// 蔵書を保存（upsert）。書籍への参照は更新しない。
///
/// 貸出と同じトランザクションで書き込めるよう、接続を受け取る。
pub(super) async fn upsert_copy(conn: &mut PgConnection, copy: &BookCopy) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO book_copies (id, book_id, state, removed, available)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (id)
        DO UPDATE SET
            state = EXCLUDED.state,
            removed = EXCLUDED.removed,
            available = EXCLUDED.available
        "#,
    )
    .bind(copy.id.value())
    .bind(copy.book_id.value())
    .bind(condition_to_column(copy.state))
    .bind(copy.removed)
    .bind(copy.available)
    .execute(conn)
    .await?;

    Ok(())
}

/// BookCopyRepositoryのPostgreSQL実装
pub struct BookCopyRepository {
    pool: PgPool,
}

impl BookCopyRepository {
    /// PostgreSQLコネクションプールから新しいBookCopyRepositoryを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookCopyRepositoryTrait for BookCopyRepository {
    async fn find_by_id(&self, book_copy_id: BookCopyId) -> Result<Option<BookCopy>> {
        let row = sqlx::query(
            r#"
            SELECT id, book_id, state, removed, available
            FROM book_copies
            WHERE id = $1
            "#,
        )
        .bind(book_copy_id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_book_copy).transpose()
    }

    async fn save(&self, copy: BookCopy) -> Result<()> {
        let mut conn = self.pool.acquire().await?;
        upsert_copy(&mut conn, &copy).await
    }

    async fn save_all(&self, copies: Vec<BookCopy>) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        for copy in &copies {
            upsert_copy(&mut *tx, copy).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn find_book_by_id(&self, book_id: BookId) -> Result<Option<Book>> {
        let row = sqlx::query(
            r#"
            SELECT id, isbn, title, editor, page_count, publication_year, authors
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(book_id.value())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let category_ids: Vec<CategoryId> = sqlx::query(
            "SELECT category_id FROM book_category_links WHERE book_id = $1",
        )
        .bind(book_id.value())
        .fetch_all(&self.pool)
        .await?
        .iter()
        .map(|row| CategoryId::from_uuid(row.get("category_id")))
        .collect();

        map_row_to_book(&row, category_ids).map(Some)
    }

    async fn find_categories_for_book(&self, book_id: BookId) -> Result<Vec<BookCategory>> {
        let rows = sqlx::query(
            r#"
            SELECT c.id, c.code, c.name, c.adult_only
            FROM book_categories c
            JOIN book_category_links l ON l.category_id = c.id
            WHERE l.book_id = $1
            ORDER BY c.code
            "#,
        )
        .bind(book_id.value())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| BookCategory {
                id: CategoryId::from_uuid(row.get("id")),
                code: row.get("code"),
                name: row.get("name"),
                adult_only: row.get("adult_only"),
            })
            .collect())
    }
}
