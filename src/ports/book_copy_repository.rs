use crate::domain::{Book, BookCategory, BookCopy, BookCopyId, BookId};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 蔵書リポジトリポート
///
/// 貸出の遷移によって`state`と`available`が書き換わる蔵書を扱う。
/// 貸出可否の判定に必要な書籍とカテゴリの参照もここで提供する。
#[async_trait]
pub trait BookCopyRepository: Send + Sync {
    /// IDで蔵書を取得する
    async fn find_by_id(&self, book_copy_id: BookCopyId) -> Result<Option<BookCopy>>;

    /// 蔵書を保存する
    async fn save(&self, copy: BookCopy) -> Result<()>;

    /// 複数の蔵書を1つのトランザクションで保存する
    async fn save_all(&self, copies: Vec<BookCopy>) -> Result<()>;

    /// IDで書籍を取得する
    async fn find_book_by_id(&self, book_id: BookId) -> Result<Option<Book>>;

    /// 書籍が属するカテゴリを取得する
    async fn find_categories_for_book(&self, book_id: BookId) -> Result<Vec<BookCategory>>;
}
