//! Book catalog endpoints (main service)

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::book::{Book, UpsertBook},
    MainState,
};

use super::{AdminUser, MessageResponse};

/// Upsert response with the persisted book
#[derive(Serialize, ToSchema)]
pub struct BookResponse {
    pub message: String,
    pub book: Book,
}

/// List the whole catalog, newest first
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "All books", body = Vec<Book>)
    )
)]
pub async fn list_books(State(state): State<MainState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.list_books().await?;
    Ok(Json(books))
}

/// Create a book, or update one when an id is supplied
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    security(("bearer_auth" = [])),
    request_body = UpsertBook,
    responses(
        (status = 201, description = "Book created", body = BookResponse),
        (status = 200, description = "Book updated", body = BookResponse),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Unknown book id")
    )
)]
pub async fn upsert_book(
    State(state): State<MainState>,
    AdminUser(_claims): AdminUser,
    Json(request): Json<UpsertBook>,
) -> AppResult<(StatusCode, Json<BookResponse>)> {
    let (book, created) = state.services.catalog.upsert_book(request).await?;

    let (status, message) = if created {
        (StatusCode::CREATED, "Book added to the catalog")
    } else {
        (StatusCode::OK, "Book updated")
    };

    Ok((
        status,
        Json(BookResponse {
            message: message.to_string(),
            book,
        }),
    ))
}

/// Update a book addressed by path id
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    request_body = UpsertBook,
    responses(
        (status = 200, description = "Book updated", body = BookResponse),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Unknown book id")
    )
)]
pub async fn update_book(
    State(state): State<MainState>,
    AdminUser(_claims): AdminUser,
    Path(id): Path<i64>,
    Json(mut request): Json<UpsertBook>,
) -> AppResult<Json<BookResponse>> {
    request.id = Some(id);
    let (book, _) = state.services.catalog.upsert_book(request).await?;

    Ok(Json(BookResponse {
        message: "Book updated".to_string(),
        book,
    }))
}

/// Delete a book from the catalog
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book deleted", body = MessageResponse),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Unknown book id"),
        (status = 409, description = "Book has an open loan")
    )
)]
pub async fn delete_book(
    State(state): State<MainState>,
    AdminUser(_claims): AdminUser,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    state.services.catalog.delete_book(id).await?;

    Ok(Json(MessageResponse {
        message: "Book removed from the catalog".to_string(),
    }))
}
