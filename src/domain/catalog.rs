use serde::{Deserialize, Serialize};

use super::{BookCopyId, BookId, CategoryId, Condition, CreateCopiesError, UpdateCopyError};

/// 著者（書籍が所有する値オブジェクト）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub first_name: String,
    pub last_name: String,
}

/// 書籍カテゴリ
///
/// `adult_only`のカテゴリを1つでも含む書籍は未成年に貸し出せない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookCategory {
    pub id: CategoryId,
    pub code: String,
    pub name: String,
    pub adult_only: bool,
}

/// 書籍（書誌情報）
///
/// カテゴリはIDで参照する。蔵書は`BookCopy::book_id`で書籍を逆参照する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub isbn: String,
    pub title: String,
    pub editor: String,
    pub page_count: u32,
    pub publication_year: i32,
    pub authors: Vec<Author>,
    pub category_ids: Vec<CategoryId>,
}

/// 蔵書 - 個別に貸し出され、状態を追跡される物理的な1冊
///
/// 不変条件：
/// - `book_id`は作成後に変わらない
/// - `state`は直近の貸出の返却状態（未返却なら貸出時状態）を反映する
/// - `available`は直近の貸出が未返却のときだけ false
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookCopy {
    pub id: BookCopyId,
    pub book_id: BookId,
    pub state: Condition,
    pub removed: bool,
    pub available: bool,
}

impl BookCopy {
    /// 新しい蔵書（貸出可能、除籍なし）
    pub fn new(book_id: BookId, state: Condition) -> Self {
        Self {
            id: BookCopyId::new(),
            book_id,
            state,
            removed: false,
            available: true,
        }
    }

    /// 貸出の対象にできるか（貸出中でも除籍済みでもない）
    pub fn is_lendable(&self) -> bool {
        self.available && !self.removed
    }
}

/// 蔵書の部分更新
///
/// 状態と除籍フラグのみ変更できる。貸出可否は貸出の遷移だけが変える。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookCopyPatch {
    pub state: Option<Condition>,
    pub removed: Option<bool>,
}

/// 純粋関数：書籍の蔵書をまとめて作成する
///
/// 状態の指定がなければ NEW。作成された蔵書はすべて貸出可能。
pub fn create_copies(
    book: &Book,
    num_copies: i32,
    initial_state: Option<Condition>,
) -> Result<Vec<BookCopy>, CreateCopiesError> {
    if num_copies <= 0 {
        return Err(CreateCopiesError::NonPositiveCount(num_copies));
    }

    let state = initial_state.unwrap_or(Condition::New);
    Ok((0..num_copies)
        .map(|_| BookCopy::new(book.id, state))
        .collect())
}

/// 純粋関数：蔵書の状態・除籍フラグを変更する
///
/// 貸出中の蔵書は、状態が最新の貸出と食い違わないよう変更を拒否する。
///
/// # 戻り値
/// 値が変わった場合のみ更新後の蔵書を`Some`で返す
pub fn update_copy(
    copy: &BookCopy,
    patch: &BookCopyPatch,
) -> Result<Option<BookCopy>, UpdateCopyError> {
    if !copy.available {
        return Err(UpdateCopyError::HasOngoingLoan);
    }

    let updated = BookCopy {
        state: patch.state.unwrap_or(copy.state),
        removed: patch.removed.unwrap_or(copy.removed),
        ..copy.clone()
    };

    Ok((updated != *copy).then_some(updated))
}
