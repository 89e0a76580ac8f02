//! Registration, login and profile endpoints (auth service)

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::account::{Account, RegisterAccount, Role, UpdateProfile},
    AuthState,
};

use super::{AuthenticatedUser, MessageResponse};

/// Login request
#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response carrying the session token
#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub role: Role,
    pub name: Option<String>,
    pub message: String,
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/register",
    tag = "auth",
    request_body = RegisterAccount,
    responses(
        (status = 201, description = "Account registered", body = MessageResponse),
        (status = 400, description = "Invalid username, password or email"),
        (status = 409, description = "Username already registered")
    )
)]
pub async fn register(
    State(state): State<AuthState>,
    Json(request): Json<RegisterAccount>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    state.services.accounts.register(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Registration successful, please log in".to_string(),
        }),
    ))
}

/// Log in with username and password
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session token issued", body = LoginResponse),
        (status = 401, description = "Invalid username or password")
    )
)]
pub async fn login(
    State(state): State<AuthState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let (token, account) = state
        .services
        .accounts
        .login(&request.username, &request.password)
        .await?;

    Ok(Json(LoginResponse {
        token,
        role: account.role,
        name: account.full_name,
        message: "Login successful".to_string(),
    }))
}

/// Get the caller's profile
#[utoipa::path(
    get,
    path = "/profile",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's account", body = Account),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_profile(
    State(state): State<AuthState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Account>> {
    let account = state.services.accounts.profile(claims.id).await?;
    Ok(Json(account))
}

/// Update the caller's profile
#[utoipa::path(
    put,
    path = "/profile",
    tag = "auth",
    security(("bearer_auth" = [])),
    request_body = UpdateProfile,
    responses(
        (status = 200, description = "Updated account", body = Account),
        (status = 400, description = "Invalid email format"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn update_profile(
    State(state): State<AuthState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<UpdateProfile>,
) -> AppResult<Json<Account>> {
    let account = state
        .services
        .accounts
        .update_profile(claims.id, request)
        .await?;
    Ok(Json(account))
}
