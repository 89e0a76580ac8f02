//! Borrow/return endpoints (main service)

use axum::{extract::State, Json};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{error::AppResult, models::borrowing::BorrowingDetails, MainState};

use super::{AuthenticatedUser, MessageResponse};

/// Borrow request
#[derive(Deserialize, ToSchema)]
pub struct BorrowRequest {
    pub book_id: i64,
    pub borrower_name: String,
    pub borrower_phone: String,
}

/// Return request
#[derive(Deserialize, ToSchema)]
pub struct ReturnRequest {
    pub borrowing_id: i64,
}

/// Borrow one copy of a book
#[utoipa::path(
    post,
    path = "/borrow",
    tag = "borrowings",
    security(("bearer_auth" = [])),
    request_body = BorrowRequest,
    responses(
        (status = 200, description = "Book borrowed", body = MessageResponse),
        (status = 404, description = "Unknown book"),
        (status = 409, description = "Book is out of stock")
    )
)]
pub async fn borrow(
    State(state): State<MainState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<BorrowRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .services
        .loans
        .borrow(&claims, request.book_id, request.borrower_name, request.borrower_phone)
        .await?;

    Ok(Json(MessageResponse {
        message: "Book borrowed successfully".to_string(),
    }))
}

/// Return a borrowed book
#[utoipa::path(
    post,
    path = "/return",
    tag = "borrowings",
    security(("bearer_auth" = [])),
    request_body = ReturnRequest,
    responses(
        (status = 200, description = "Book returned", body = MessageResponse),
        (status = 404, description = "Unknown borrowing"),
        (status = 409, description = "Borrowing already returned")
    )
)]
pub async fn return_loan(
    State(state): State<MainState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<ReturnRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .services
        .loans
        .return_loan(&claims, request.borrowing_id)
        .await?;

    Ok(Json(MessageResponse {
        message: "Book has been returned".to_string(),
    }))
}

/// List borrowing history, scoped by role
#[utoipa::path(
    get,
    path = "/borrowings/all",
    tag = "borrowings",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Borrowings visible to the caller", body = Vec<BorrowingDetails>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_borrowings(
    State(state): State<MainState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<BorrowingDetails>>> {
    let borrowings = state.services.loans.list_borrowings(&claims).await?;
    Ok(Json(borrowings))
}
