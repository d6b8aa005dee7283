use crate::application::{
    ServiceDependencies, book_copy,
    book_copy::BookCopyApplicationError,
    loan::{self, LoanApplicationError},
    member,
};
use crate::domain::value_objects::{BookCopyId, BookId, LoanId, MemberId};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use std::sync::Arc;
use uuid::Uuid;

use super::{
    error::ApiError,
    types::{
        BookCopyResponse, CreateBookCopiesRequest, CreateLoanRequest, LoanResponse,
        LoanTimelineResponse, MemberResponse, UpdateBookCopyRequest, UpdateLoanRequest,
    },
};

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
}

/// JSONボディを取り出す
///
/// ボディが無い（Content-Typeが無い）場合は`missing`を、
/// 解釈できない場合はJSONの拒否理由をそのまま返す。
fn json_body<T, E>(body: Result<Json<T>, JsonRejection>, missing: E) -> Result<T, ApiError>
where
    E: FnOnce() -> ApiError,
{
    match body {
        Ok(Json(req)) => Ok(req),
        Err(JsonRejection::MissingJsonContentType(_)) => Err(missing()),
        Err(rejection) => Err(rejection.into()),
    }
}

// ============================================================================
// Loan command handlers
// ============================================================================

/// POST /loans - 新しい貸出を作成
///
/// 強制されるビジネスルール:
/// - 会員と蔵書のIDが指定されていること
/// - 未成年の会員に成人向けの書籍を貸し出さないこと
/// - 蔵書が貸出可能で除籍されていないこと
pub async fn create_loan(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateLoanRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<LoanResponse>), ApiError> {
    let req = json_body(body, || {
        LoanApplicationError::InvalidArgument("Missing information to create loan".to_string())
            .into()
    })?;
    let loan = loan::create_loan(&state.service_deps, req.to_command()).await?;

    Ok((StatusCode::CREATED, Json(LoanResponse::from(loan))))
}

/// PUT /loans/:id - 貸出を更新
///
/// 貸出日時の修正、返却の登録・修正・取消を行う。
/// ボディが無い、解釈できない、またはボディのIDがパスと異なる場合は400。
pub async fn update_loan(
    State(state): State<Arc<AppState>>,
    Path(loan_id): Path<Uuid>,
    body: Result<Json<UpdateLoanRequest>, JsonRejection>,
) -> Result<Json<LoanResponse>, ApiError> {
    let req = json_body(body, || {
        LoanApplicationError::InvalidArgument("Missing information to update loan".to_string())
            .into()
    })?;

    if req.id.is_some_and(|id| id != loan_id) {
        return Err(LoanApplicationError::InvalidArgument(
            "Wrong loan id to update loan".to_string(),
        )
        .into());
    }

    let cmd = req.to_command(LoanId::from_uuid(loan_id));
    let loan = loan::update_loan(&state.service_deps, cmd).await?;

    Ok(Json(LoanResponse::from(loan)))
}

/// DELETE /loans/:id - 貸出を取り消す
///
/// 未返却の貸出のみ削除できる。
pub async fn delete_loan(
    State(state): State<Arc<AppState>>,
    Path(loan_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    loan::delete_loan_by_id(&state.service_deps, LoanId::from_uuid(loan_id)).await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Loan query handlers
// ============================================================================

/// GET /loans - 全貸出を貸出日時の降順で取得
pub async fn list_loans(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<LoanResponse>>, ApiError> {
    let loans = loan::list_loans(&state.service_deps).await?;

    Ok(Json(loans.into_iter().map(LoanResponse::from).collect()))
}

/// GET /loans/:id - 貸出詳細をIDで取得
pub async fn get_loan_by_id(
    State(state): State<Arc<AppState>>,
    Path(loan_id): Path<Uuid>,
) -> Result<Json<LoanResponse>, ApiError> {
    let loan = loan::get_loan_by_id(&state.service_deps, LoanId::from_uuid(loan_id)).await?;

    Ok(Json(LoanResponse::from(loan)))
}

/// GET /loans/:id/timeline - 同じ蔵書の前後の貸出を取得（診断用）
pub async fn get_loan_timeline(
    State(state): State<Arc<AppState>>,
    Path(loan_id): Path<Uuid>,
) -> Result<Json<LoanTimelineResponse>, ApiError> {
    let timeline = loan::loan_timeline(&state.service_deps, LoanId::from_uuid(loan_id)).await?;

    Ok(Json(LoanTimelineResponse::from(timeline)))
}

// ============================================================================
// Book copy handlers
// ============================================================================

/// POST /books/:book_id/copies - 書籍の蔵書をまとめて作成
pub async fn create_book_copies(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<Uuid>,
    body: Result<Json<CreateBookCopiesRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Vec<BookCopyResponse>>), ApiError> {
    let req = json_body(body, || {
        BookCopyApplicationError::InvalidArgument("Missing book copies to create.".to_string())
            .into()
    })?;

    let cmd = req.to_command(BookId::from_uuid(book_id));
    let copies = book_copy::create_book_copies(&state.service_deps, cmd).await?;

    Ok((
        StatusCode::CREATED,
        Json(copies.into_iter().map(BookCopyResponse::from).collect()),
    ))
}

/// GET /books/:book_id/copies/:copy_id - 蔵書を取得
pub async fn get_book_copy(
    State(state): State<Arc<AppState>>,
    Path((book_id, copy_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<BookCopyResponse>, ApiError> {
    let copy = book_copy::get_book_copy(
        &state.service_deps,
        BookId::from_uuid(book_id),
        BookCopyId::from_uuid(copy_id),
    )
    .await?;

    Ok(Json(BookCopyResponse::from(copy)))
}

/// PUT /books/:book_id/copies/:copy_id - 蔵書の状態・除籍フラグを更新
///
/// 貸出中の蔵書は409。
pub async fn update_book_copy(
    State(state): State<Arc<AppState>>,
    Path((book_id, copy_id)): Path<(Uuid, Uuid)>,
    body: Result<Json<UpdateBookCopyRequest>, JsonRejection>,
) -> Result<Json<BookCopyResponse>, ApiError> {
    let req = json_body(body, || {
        BookCopyApplicationError::InvalidArgument(
            "Missing book id or book copy id or book copy information.".to_string(),
        )
        .into()
    })?;

    if req.id.is_some_and(|id| id != copy_id) {
        return Err(BookCopyApplicationError::InvalidArgument(
            "Wrong book copy id to update.".to_string(),
        )
        .into());
    }

    let cmd = req.to_command(BookId::from_uuid(book_id), BookCopyId::from_uuid(copy_id));
    let copy = book_copy::update_book_copy(&state.service_deps, cmd).await?;

    Ok(Json(BookCopyResponse::from(copy)))
}

/// GET /books/:book_id/copies/:copy_id/loans - 蔵書の貸出履歴（新しい順）
pub async fn get_book_copy_loans(
    State(state): State<Arc<AppState>>,
    Path((book_id, copy_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Vec<LoanResponse>>, ApiError> {
    let loans = book_copy::get_book_copy_loans(
        &state.service_deps,
        BookId::from_uuid(book_id),
        BookCopyId::from_uuid(copy_id),
    )
    .await?;

    Ok(Json(loans.into_iter().map(LoanResponse::from).collect()))
}

// ============================================================================
// Member handlers
// ============================================================================

/// GET /members/:member_id - 会員を取得
pub async fn get_member(
    State(state): State<Arc<AppState>>,
    Path(member_id): Path<Uuid>,
) -> Result<Json<MemberResponse>, ApiError> {
    let member =
        member::get_member_by_id(&state.service_deps, MemberId::from_uuid(member_id)).await?;

    Ok(Json(MemberResponse::from(member)))
}

/// DELETE /members/:member_id - 会員を削除
///
/// 未返却の貸出がある会員は409。返却済みの貸出は残る。
pub async fn delete_member(
    State(state): State<Arc<AppState>>,
    Path(member_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    member::delete_member_by_id(&state.service_deps, MemberId::from_uuid(member_id)).await?;

    Ok(StatusCode::NO_CONTENT)
}
