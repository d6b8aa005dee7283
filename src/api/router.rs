use axum::{
    Json, Router,
    routing::{get, post},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, create_book_copies, create_loan, delete_loan, delete_member, get_book_copy,
    get_book_copy_loans, get_loan_by_id, get_loan_timeline, get_member, list_loans,
    update_book_copy, update_loan,
};

/// 貸出管理APIのルーターを作成する
///
/// - GET    /api/v1/rest/loans                                - 貸出一覧（貸出日時の降順）
/// - POST   /api/v1/rest/loans                                - 貸出作成
/// - GET    /api/v1/rest/loans/:id                            - 貸出詳細
/// - PUT    /api/v1/rest/loans/:id                            - 貸出更新（返却の登録・修正・取消）
/// - DELETE /api/v1/rest/loans/:id                            - 貸出取消
/// - GET    /api/v1/rest/loans/:id/timeline                   - 前後の貸出（診断用）
/// - POST   /api/v1/rest/books/:book_id/copies                - 蔵書作成
/// - GET    /api/v1/rest/books/:book_id/copies/:copy_id       - 蔵書詳細
/// - PUT    /api/v1/rest/books/:book_id/copies/:copy_id       - 蔵書更新
/// - GET    /api/v1/rest/books/:book_id/copies/:copy_id/loans - 蔵書の貸出履歴（新しい順）
/// - GET    /api/v1/rest/members/:member_id                   - 会員詳細
/// - DELETE /api/v1/rest/members/:member_id                   - 会員削除
pub fn create_router(state: Arc<AppState>) -> Router {
    let loans = Router::new()
        .route("/", get(list_loans).post(create_loan))
        .route(
            "/:id",
            get(get_loan_by_id).put(update_loan).delete(delete_loan),
        )
        .route("/:id/timeline", get(get_loan_timeline));

    let books = Router::new()
        .route("/:book_id/copies", post(create_book_copies))
        .route(
            "/:book_id/copies/:copy_id",
            get(get_book_copy).put(update_book_copy),
        )
        .route("/:book_id/copies/:copy_id/loans", get(get_book_copy_loans));

    let members = Router::new().route("/:member_id", get(get_member).delete(delete_member));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1/rest/loans", loans)
        .nest("/api/v1/rest/books", books)
        .nest("/api/v1/rest/members", members)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
