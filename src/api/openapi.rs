//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, books, borrowings, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pustaka Auth API",
        version = "0.1.0",
        description = "Library lending system - authentication service"
    ),
    paths(
        health::health_check,
        health::readiness_check,
        auth::register,
        auth::login,
        auth::get_profile,
        auth::update_profile,
    ),
    components(
        schemas(
            auth::LoginRequest,
            auth::LoginResponse,
            crate::api::MessageResponse,
            crate::models::account::Account,
            crate::models::account::Role,
            crate::models::account::RegisterAccount,
            crate::models::account::UpdateProfile,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Registration, login and profile")
    )
)]
pub struct AuthApiDoc;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pustaka Main API",
        version = "0.1.0",
        description = "Library lending system - catalog and borrowings"
    ),
    paths(
        health::health_check,
        health::readiness_check,
        books::list_books,
        books::upsert_book,
        books::update_book,
        books::delete_book,
        borrowings::borrow,
        borrowings::return_loan,
        borrowings::list_borrowings,
    ),
    components(
        schemas(
            books::BookResponse,
            crate::api::MessageResponse,
            borrowings::BorrowRequest,
            borrowings::ReturnRequest,
            crate::models::book::Book,
            crate::models::book::UpsertBook,
            crate::models::borrowing::Borrowing,
            crate::models::borrowing::BorrowingDetails,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Book catalog management"),
        (name = "borrowings", description = "Borrow and return transactions")
    )
)]
pub struct MainApiDoc;

/// Swagger router for the auth service
pub fn auth_docs_router() -> Router {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", AuthApiDoc::openapi()))
}

/// Swagger router for the main service
pub fn main_docs_router() -> Router {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", MainApiDoc::openapi()))
}
