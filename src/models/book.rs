//! Book (catalog) model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Book row from the catalog
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub year: i32,
    pub genre: String,
    pub cover_url: String,
    /// Count of currently available (not-on-loan) copies
    pub stock: i32,
}

/// Create-or-update request: an `id` selects update mode
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpsertBook {
    pub id: Option<i64>,
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author must not be empty"))]
    pub author: String,
    pub year: i32,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub cover_url: String,
    #[serde(default)]
    #[validate(range(min = 0, message = "Stock must not be negative"))]
    pub stock: i32,
}
