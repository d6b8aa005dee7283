//! 統合テスト・E2Eテストで共有するフィクスチャ
//!
//! テストファイルごとに使う関数が異なるため、未使用の警告は抑止する。
#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, Utc};
use rusty_library_circulation::adapters::{clock::FixedClock, memory};
use rusty_library_circulation::adapters::postgres::PostgresBookCopyRepository;
use rusty_library_circulation::application::ServiceDependencies;
use rusty_library_circulation::config::AppConfig;
use rusty_library_circulation::domain::*;
use rusty_library_circulation::ports::BookCopyRepository as _;
use sqlx::PgPool;
use std::sync::Arc;

/// 固定時計が返す現在時刻
pub const NOW: &str = "2021-12-01T10:00:00Z";

pub fn at(date_time: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(date_time).unwrap().with_timezone(&Utc)
}

// ============================================================================
// インメモリの図書館
// ============================================================================

/// インメモリのストアと、それを共有するサービスの依存関係
///
/// `store`から書き込み結果や回数を直接確認できる。
pub struct Library {
    pub store: Arc<memory::MemoryStore>,
    pub deps: ServiceDependencies,
}

impl Library {
    pub fn new() -> Self {
        let store = Arc::new(memory::MemoryStore::new());
        let deps = ServiceDependencies {
            loan_repository: Arc::new(memory::LoanRepository::new(store.clone())),
            book_copy_repository: Arc::new(memory::BookCopyRepository::new(store.clone())),
            member_repository: Arc::new(memory::MemberRepository::new(store.clone())),
            clock: Arc::new(FixedClock(at(NOW))),
        };
        Self { store, deps }
    }

    pub fn add_member(&self, birthday: NaiveDate) -> Member {
        let member = Member {
            id: MemberId::new(),
            name: "Dupont".to_string(),
            first_name: "Alice".to_string(),
            birthday,
        };
        self.store.add_member(member.clone());
        member
    }

    pub fn add_major_member(&self) -> Member {
        self.add_member(NaiveDate::from_ymd_opt(1985, 3, 12).unwrap())
    }

    pub fn add_minor_member(&self) -> Member {
        self.add_member(NaiveDate::from_ymd_opt(2010, 6, 1).unwrap())
    }

    /// 書籍を1つのカテゴリ（成人向けかどうかを指定）付きで登録
    pub fn add_book(&self, adult_only: bool) -> Book {
        let category = BookCategory {
            id: CategoryId::new(),
            code: if adult_only { "ADU" } else { "NOV" }.to_string(),
            name: if adult_only { "Adult" } else { "Novel" }.to_string(),
            adult_only,
        };
        let book = Book {
            id: BookId::new(),
            isbn: "978-2070368228".to_string(),
            title: "Le Petit Prince".to_string(),
            editor: "Gallimard".to_string(),
            page_count: 96,
            publication_year: 1943,
            authors: vec![Author {
                first_name: "Antoine".to_string(),
                last_name: "de Saint-Exupéry".to_string(),
            }],
            category_ids: vec![category.id],
        };
        self.store.add_category(category);
        self.store.add_book(book.clone());
        book
    }

    /// 書籍と、その蔵書1冊（貸出可能）を登録
    pub fn add_copy(&self, state: Condition, adult_only: bool) -> BookCopy {
        let book = self.add_book(adult_only);
        let copy = BookCopy::new(book.id, state);
        self.store.add_copy(copy.clone());
        copy
    }

    /// 蔵書を貸出中にする
    pub fn mark_lent(&self, copy: &BookCopy) {
        let mut lent = self.copy(copy);
        lent.available = false;
        self.store.add_copy(lent);
    }

    /// 会員を指定して貸出を登録
    pub fn add_loan_for(
        &self,
        member_id: MemberId,
        copy: &BookCopy,
        loan_date: &str,
        initial_state: Condition,
        returned: Option<(&str, Condition)>,
    ) -> Loan {
        let loan = Loan {
            id: LoanId::new(),
            member_id,
            book_copy_id: copy.id,
            loan_date_time: at(loan_date),
            initial_state,
            returned: returned.map(|(date, state)| LoanReturn {
                date_time: at(date),
                state,
            }),
        };
        self.store.add_loan(loan.clone());
        loan
    }

    /// 新しい会員IDで貸出を登録
    pub fn add_loan(
        &self,
        copy: &BookCopy,
        loan_date: &str,
        initial_state: Condition,
        returned: Option<(&str, Condition)>,
    ) -> Loan {
        self.add_loan_for(MemberId::new(), copy, loan_date, initial_state, returned)
    }

    /// ストアにある現在の蔵書
    pub fn copy(&self, copy: &BookCopy) -> BookCopy {
        self.store.copy(copy.id).unwrap()
    }
}

// ============================================================================
// PostgreSQL
// ============================================================================

/// テスト用データベースプールを作成し、マイグレーションを実行
///
/// 接続先はアプリケーションと同じ`AppConfig`から読む（`DATABASE_URL`で上書き可能）。
pub async fn create_test_pool() -> PgPool {
    let config = AppConfig::load().expect("Failed to load configuration");

    let pool = PgPool::connect(&config.database.url)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// SQLで直接登録した会員・書籍・蔵書
///
/// 各テストは新しいIDだけを使うため、他のテストのデータとは干渉しない。
pub struct PgFixture {
    pub member: Member,
    pub book: Book,
    pub copy: BookCopy,
    pub adult_category: CategoryId,
}

pub async fn insert_fixture(pool: &PgPool) -> PgFixture {
    let member = Member {
        id: MemberId::new(),
        name: "Bernard".to_string(),
        first_name: "Louise".to_string(),
        birthday: NaiveDate::from_ymd_opt(1975, 9, 30).unwrap(),
    };
    sqlx::query("INSERT INTO members (id, name, first_name, birthday) VALUES ($1, $2, $3, $4)")
        .bind(member.id.value())
        .bind(&member.name)
        .bind(&member.first_name)
        .bind(member.birthday)
        .execute(pool)
        .await
        .unwrap();

    let adult_category = CategoryId::new();
    let categories = [(adult_category, true), (CategoryId::new(), false)];
    let book_id = BookId::new();
    let book = Book {
        id: book_id,
        isbn: book_id.value().to_string(),
        title: "Bel-Ami".to_string(),
        editor: "Folio".to_string(),
        page_count: 448,
        publication_year: 1885,
        authors: vec![Author {
            first_name: "Guy".to_string(),
            last_name: "de Maupassant".to_string(),
        }],
        category_ids: categories.iter().map(|(id, _)| *id).collect(),
    };
    sqlx::query(
        r#"
        INSERT INTO books (id, isbn, title, editor, page_count, publication_year, authors)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(book.id.value())
    .bind(&book.isbn)
    .bind(&book.title)
    .bind(&book.editor)
    .bind(book.page_count as i32)
    .bind(book.publication_year)
    .bind(serde_json::to_value(&book.authors).unwrap())
    .execute(pool)
    .await
    .unwrap();

    for (id, adult_only) in categories {
        sqlx::query(
            r#"
            INSERT INTO book_categories (id, code, name, adult_only)
            VALUES ($1, $2, 'category', $3)
            "#,
        )
        .bind(id.value())
        .bind(id.value().to_string())
        .bind(adult_only)
        .execute(pool)
        .await
        .unwrap();
        sqlx::query("INSERT INTO book_category_links (book_id, category_id) VALUES ($1, $2)")
            .bind(book.id.value())
            .bind(id.value())
            .execute(pool)
            .await
            .unwrap();
    }

    let copy = BookCopy::new(book.id, Condition::VeryGood);
    PostgresBookCopyRepository::new(pool.clone())
        .save(copy.clone())
        .await
        .unwrap();

    PgFixture {
        member,
        book,
        copy,
        adult_category,
    }
}

/// フィクスチャの会員・蔵書で貸出を作る（保存はしない）
pub fn pg_loan(fixture: &PgFixture, loan_date: &str, returned: Option<(&str, Condition)>) -> Loan {
    Loan {
        id: LoanId::new(),
        member_id: fixture.member.id,
        book_copy_id: fixture.copy.id,
        loan_date_time: at(loan_date),
        initial_state: Condition::VeryGood,
        returned: returned.map(|(date, state)| LoanReturn {
            date_time: at(date),
            state,
        }),
    }
}
