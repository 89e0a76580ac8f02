//! Borrowing (loan) model and related types

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::time;

/// Borrowing row from the main database; open while `return_date` is null
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Borrowing {
    pub id: i64,
    pub book_id: i64,
    pub user_id: i64,
    pub borrower_name: String,
    pub borrower_phone: String,
    #[serde(with = "time::wib_format")]
    pub borrow_date: NaiveDateTime,
    #[serde(with = "time::wib_format_opt")]
    pub return_date: Option<NaiveDateTime>,
}

/// Borrowing joined with its book's display fields
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BorrowingDetails {
    pub id: i64,
    pub title: String,
    pub cover_url: String,
    #[serde(with = "time::wib_format")]
    pub borrow_date: NaiveDateTime,
    #[serde(with = "time::wib_format_opt")]
    pub return_date: Option<NaiveDateTime>,
    pub user_id: i64,
    pub borrower_name: String,
    pub borrower_phone: String,
}

/// Internal insert payload for a new loan
#[derive(Debug)]
pub struct CreateBorrowing {
    pub book_id: i64,
    pub user_id: i64,
    pub borrower_name: String,
    pub borrower_phone: String,
    pub borrow_date: NaiveDateTime,
}
