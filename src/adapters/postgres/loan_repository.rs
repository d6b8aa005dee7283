use crate::domain::{BookCopy, BookCopyId, Loan, LoanChanges, LoanId, LoanReturn, MemberId};
use crate::ports::loan_repository::{LoanRepository as LoanRepositoryTrait, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool, Row, postgres::PgRow};

use super::book_copy_repository::upsert_copy;
use super::{condition_from_column, condition_to_column, invalid_data};

const SELECT_LOANS: &str = r#"
    SELECT
        id,
        member_id,
        book_copy_id,
        loan_date_time,
        initial_state,
        return_date_time,
        return_state
    FROM loans
"#;

/// PostgreSQLの行データをLoanに変換する
///
/// 返却日時と返却状態の片方だけがNULLの行は不正データとして扱う。
fn map_row_to_loan(row: &PgRow) -> Result<Loan> {
    let return_date_time: Option<DateTime<Utc>> = row.get("return_date_time");
    let return_state: Option<i16> = row.get("return_state");

    let returned = match (return_date_time, return_state) {
        (Some(date_time), Some(state)) => Some(LoanReturn {
            date_time,
            state: condition_from_column(state)?,
        }),
        (None, None) => None,
        _ => {
            return Err(invalid_data(
                "return_date_time and return_state must be both null or both set".to_string(),
            ));
        }
    };

    Ok(Loan {
        id: LoanId::from_uuid(row.get("id")),
        member_id: MemberId::from_uuid(row.get("member_id")),
        book_copy_id: BookCopyId::from_uuid(row.get("book_copy_id")),
        loan_date_time: row.get("loan_date_time"),
        initial_state: condition_from_column(row.get("initial_state"))?,
        returned,
    })
}

/// LoanRepositoryのPostgreSQL実装
pub struct LoanRepository {
    pool: PgPool,
}

impl LoanRepository {
    /// PostgreSQLコネクションプールから新しいLoanRepositoryを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// 貸出を保存（upsert）
///
/// 会員と蔵書の参照は作成後に変わらないため、UPDATE 側では更新しない。
async fn upsert_loan(conn: &mut PgConnection, loan: &Loan) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO loans (
            id,
            member_id,
            book_copy_id,
            loan_date_time,
            initial_state,
            return_date_time,
            return_state
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (id)
        DO UPDATE SET
            loan_date_time = EXCLUDED.loan_date_time,
            initial_state = EXCLUDED.initial_state,
            return_date_time = EXCLUDED.return_date_time,
            return_state = EXCLUDED.return_state
        "#,
    )
    .bind(loan.id.value())
    .bind(loan.member_id.value())
    .bind(loan.book_copy_id.value())
    .bind(loan.loan_date_time)
    .bind(condition_to_column(loan.initial_state))
    .bind(loan.return_date_time())
    .bind(loan.return_state().map(condition_to_column))
    .execute(conn)
    .await?;

    Ok(())
}

#[async_trait]
impl LoanRepositoryTrait for LoanRepository {
    async fn find_by_id(&self, loan_id: LoanId) -> Result<Option<Loan>> {
        let row = sqlx::query(&format!("{SELECT_LOANS} WHERE id = $1"))
            .bind(loan_id.value())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_row_to_loan).transpose()
    }

    /// 貸出と蔵書を1つのトランザクションで保存する
    ///
    /// エラーで途中終了した場合、トランザクションはコミットされずにロールバックされる。
    async fn save_changes(&self, changes: LoanChanges) -> Result<()> {
        if changes.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;

        if let Some(loan) = &changes.loan {
            upsert_loan(&mut *tx, loan).await?;
        }
        if let Some(copy) = &changes.copy {
            upsert_copy(&mut *tx, copy).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn delete_with_copy(&self, loan_id: LoanId, copy: BookCopy) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM loans WHERE id = $1")
            .bind(loan_id.value())
            .execute(&mut *tx)
            .await?;
        upsert_copy(&mut *tx, &copy).await?;

        tx.commit().await?;
        Ok(())
    }

    async fn find_by_book_copy_id(&self, book_copy_id: BookCopyId) -> Result<Vec<Loan>> {
        let rows = sqlx::query(&format!("{SELECT_LOANS} WHERE book_copy_id = $1"))
            .bind(book_copy_id.value())
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(map_row_to_loan).collect()
    }

    async fn find_by_member_id(&self, member_id: MemberId) -> Result<Vec<Loan>> {
        let rows = sqlx::query(&format!("{SELECT_LOANS} WHERE member_id = $1"))
            .bind(member_id.value())
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(map_row_to_loan).collect()
    }

    async fn find_all(&self) -> Result<Vec<Loan>> {
        let rows = sqlx::query(&format!("{SELECT_LOANS} ORDER BY loan_date_time DESC"))
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(map_row_to_loan).collect()
    }
}
