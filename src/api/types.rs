use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::application::loan::LoanTimeline;
use crate::domain::{
    BookCopy, BookCopyId, BookCopyPatch, BookId, Condition, Loan, LoanPatch, Member, MemberId,
    commands::{CreateBookCopies, CreateLoan, UpdateBookCopy, UpdateLoan},
    value_objects::LoanId,
};

// ============================================================================
// Date time
// ============================================================================

/// リクエスト中の日時
///
/// タイムゾーン付き（RFC 3339）に加え、タイムゾーンなしの日時も受け付け、UTCとみなす。
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RequestDateTime {
    Zoned(DateTime<Utc>),
    Local(NaiveDateTime),
}

impl From<RequestDateTime> for DateTime<Utc> {
    fn from(value: RequestDateTime) -> Self {
        match value {
            RequestDateTime::Zoned(date_time) => date_time,
            RequestDateTime::Local(date_time) => date_time.and_utc(),
        }
    }
}

fn deserialize_date_time<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RequestDateTime>::deserialize(deserializer)?.map(DateTime::from))
}

// ============================================================================
// Loans
// ============================================================================

/// 貸出作成リクエスト（POST /loans）
#[derive(Debug, Deserialize)]
pub struct CreateLoanRequest {
    pub member_id: Option<Uuid>,
    pub book_copy_id: Option<Uuid>,
    #[serde(default, deserialize_with = "deserialize_date_time")]
    pub loan_date_time: Option<DateTime<Utc>>,
}

impl CreateLoanRequest {
    pub fn to_command(&self) -> CreateLoan {
        CreateLoan {
            member_id: self.member_id.map(MemberId::from_uuid),
            book_copy_id: self.book_copy_id.map(BookCopyId::from_uuid),
            loan_date_time: self.loan_date_time,
        }
    }
}

/// 貸出更新リクエスト（PUT /loans/:id）
///
/// 貸出日時・返却日時・返却状態以外は無視される。
/// `id`を含める場合はパスのIDと一致しなければならない。
#[derive(Debug, Deserialize)]
pub struct UpdateLoanRequest {
    pub id: Option<Uuid>,
    #[serde(default, deserialize_with = "deserialize_date_time")]
    pub loan_date_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_date_time")]
    pub return_date_time: Option<DateTime<Utc>>,
    pub return_state: Option<Condition>,
}

impl UpdateLoanRequest {
    pub fn to_command(&self, loan_id: LoanId) -> UpdateLoan {
        UpdateLoan {
            loan_id,
            patch: Some(LoanPatch {
                loan_date_time: self.loan_date_time,
                return_date_time: self.return_date_time,
                return_state: self.return_state,
            }),
        }
    }
}

/// 貸出レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct LoanResponse {
    pub id: Uuid,
    pub member_id: Uuid,
    pub book_copy_id: Uuid,
    pub loan_date_time: DateTime<Utc>,
    pub initial_state: Condition,
    pub return_date_time: Option<DateTime<Utc>>,
    pub return_state: Option<Condition>,
}

impl From<Loan> for LoanResponse {
    fn from(loan: Loan) -> Self {
        Self {
            id: loan.id.value(),
            member_id: loan.member_id.value(),
            book_copy_id: loan.book_copy_id.value(),
            loan_date_time: loan.loan_date_time,
            initial_state: loan.initial_state,
            return_date_time: loan.return_date_time(),
            return_state: loan.return_state(),
        }
    }
}

/// 貸出の前後関係レスポンス（GET /loans/:id/timeline）
#[derive(Debug, Serialize, Deserialize)]
pub struct LoanTimelineResponse {
    pub loan: LoanResponse,
    pub previous: Option<LoanResponse>,
    pub next: Option<LoanResponse>,
    pub most_recent: Option<LoanResponse>,
}

impl From<LoanTimeline> for LoanTimelineResponse {
    fn from(timeline: LoanTimeline) -> Self {
        Self {
            loan: timeline.loan.into(),
            previous: timeline.previous.map(LoanResponse::from),
            next: timeline.next.map(LoanResponse::from),
            most_recent: timeline.most_recent.map(LoanResponse::from),
        }
    }
}

// ============================================================================
// Book copies
// ============================================================================

/// 蔵書作成リクエスト（POST /books/:book_id/copies）
#[derive(Debug, Deserialize)]
pub struct CreateBookCopiesRequest {
    #[serde(default)]
    pub num_copies: i32,
    pub initial_state: Option<Condition>,
}

impl CreateBookCopiesRequest {
    pub fn to_command(&self, book_id: BookId) -> CreateBookCopies {
        CreateBookCopies {
            book_id,
            num_copies: self.num_copies,
            initial_state: self.initial_state,
        }
    }
}

/// 蔵書更新リクエスト（PUT /books/:book_id/copies/:copy_id）
///
/// `id`を含める場合はパスのIDと一致しなければならない。
#[derive(Debug, Deserialize)]
pub struct UpdateBookCopyRequest {
    pub id: Option<Uuid>,
    pub state: Option<Condition>,
    pub removed: Option<bool>,
}

impl UpdateBookCopyRequest {
    pub fn to_command(&self, book_id: BookId, book_copy_id: BookCopyId) -> UpdateBookCopy {
        UpdateBookCopy {
            book_id,
            book_copy_id,
            patch: Some(BookCopyPatch {
                state: self.state,
                removed: self.removed,
            }),
        }
    }
}

/// 蔵書レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct BookCopyResponse {
    pub id: Uuid,
    pub book_id: Uuid,
    pub state: Condition,
    pub removed: bool,
    pub available: bool,
}

impl From<BookCopy> for BookCopyResponse {
    fn from(copy: BookCopy) -> Self {
        Self {
            id: copy.id.value(),
            book_id: copy.book_id.value(),
            state: copy.state,
            removed: copy.removed,
            available: copy.available,
        }
    }
}

// ============================================================================
// Members
// ============================================================================

/// 会員レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct MemberResponse {
    pub id: Uuid,
    pub name: String,
    pub first_name: String,
    pub birthday: NaiveDate,
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self {
            id: member.id.value(),
            name: member.name,
            first_name: member.first_name,
            birthday: member.birthday,
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// エラーレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}
