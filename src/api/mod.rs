//! API handlers for the Pustaka REST endpoints

pub mod auth;
pub mod books;
pub mod borrowings;
pub mod health;
pub mod openapi;

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use serde::Serialize;
use utoipa::ToSchema;

use crate::{config::AppConfig, error::AppError, models::account::Claims};

/// Plain confirmation response shared by mutation endpoints
#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Extractor for the authenticated caller from a bearer JWT.
///
/// A missing credential is Unauthorized; a malformed, expired, or badly
/// signed one is Forbidden. Implemented against any state exposing the
/// shared configuration so both service binaries can use it.
pub struct AuthenticatedUser(pub Claims);

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
    Arc<AppConfig>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Get the Authorization header
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

        // Check for Bearer token
        if !auth_header.starts_with("Bearer ") {
            return Err(AppError::Authentication(
                "Invalid authorization header format".to_string(),
            ));
        }

        let token = &auth_header[7..];

        // Validate the token against the shared signing secret
        let config = Arc::<AppConfig>::from_ref(state);
        let claims = Claims::from_token(token, &config.auth.jwt_secret)
            .map_err(|_| AppError::Authorization("Session is invalid or expired".to_string()))?;

        Ok(AuthenticatedUser(claims))
    }
}

/// Extractor requiring the admin role on top of authentication.
///
/// Runs before body extraction, so a non-admin caller is refused no matter
/// what the payload looks like.
pub struct AdminUser(pub Claims);

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    Arc<AppConfig>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthenticatedUser(claims) = AuthenticatedUser::from_request_parts(parts, state).await?;
        claims.require_admin()?;
        Ok(AdminUser(claims))
    }
}
