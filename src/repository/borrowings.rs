//! Borrowings repository: the borrow/return transactional core
//!
//! Both state transitions run as a single transaction built around an
//! atomic conditional update, so the stock counter and the loan row can
//! never drift apart under concurrent requests or a crash between effects.

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::borrowing::{Borrowing, BorrowingDetails, CreateBorrowing},
    time,
};

#[derive(Clone)]
pub struct BorrowingsRepository {
    pool: Pool<Postgres>,
}

impl BorrowingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get a borrowing by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Borrowing> {
        sqlx::query_as::<_, Borrowing>("SELECT * FROM borrowings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Borrowing with id {} not found", id)))
    }

    /// Create a new loan: decrement stock and insert the borrowing row in
    /// one transaction.
    ///
    /// The conditional `stock > 0` update is the concurrency guard: of two
    /// simultaneous borrows against the last copy, exactly one sees an
    /// affected row and the other resolves to an out-of-stock conflict.
    pub async fn create(&self, loan: &CreateBorrowing) -> AppResult<i64> {
        let mut tx = self.pool.begin().await?;

        let affected = sqlx::query("UPDATE books SET stock = stock - 1 WHERE id = $1 AND stock > 0")
            .bind(loan.book_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if affected == 0 {
            let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE id = $1)")
                .bind(loan.book_id)
                .fetch_one(&mut *tx)
                .await?;
            return Err(if exists {
                AppError::Conflict("Book is out of stock".to_string())
            } else {
                AppError::NotFound(format!("Book with id {} not found", loan.book_id))
            });
        }

        let borrowing_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO borrowings (book_id, user_id, borrower_name, borrower_phone, borrow_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(loan.book_id)
        .bind(loan.user_id)
        .bind(&loan.borrower_name)
        .bind(&loan.borrower_phone)
        .bind(loan.borrow_date)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(borrowing_id)
    }

    /// Close a loan: stamp `return_date` and increment stock in one
    /// transaction.
    ///
    /// The `return_date IS NULL` condition is the idempotency guard — a
    /// second return of the same loan claims no row and cannot increment
    /// stock again.
    pub async fn close(&self, borrowing_id: i64) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let claimed: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE borrowings SET return_date = $1
            WHERE id = $2 AND return_date IS NULL
            RETURNING book_id
            "#,
        )
        .bind(time::now())
        .bind(borrowing_id)
        .fetch_optional(&mut *tx)
        .await?;

        let book_id = match claimed {
            Some(book_id) => book_id,
            None => {
                let exists: bool =
                    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM borrowings WHERE id = $1)")
                        .bind(borrowing_id)
                        .fetch_one(&mut *tx)
                        .await?;
                return Err(if exists {
                    AppError::Conflict("Borrowing has already been returned".to_string())
                } else {
                    AppError::NotFound(format!("Borrowing with id {} not found", borrowing_id))
                });
            }
        };

        sqlx::query("UPDATE books SET stock = stock + 1 WHERE id = $1")
            .bind(book_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// List every borrowing joined with its book, newest first
    pub async fn list_all(&self) -> AppResult<Vec<BorrowingDetails>> {
        let rows = sqlx::query_as::<_, BorrowingDetails>(
            r#"
            SELECT b.id, bk.title, bk.cover_url, b.borrow_date, b.return_date,
                   b.user_id, b.borrower_name, b.borrower_phone
            FROM borrowings b
            JOIN books bk ON b.book_id = bk.id
            ORDER BY b.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// List one user's borrowings joined with their books, newest first
    pub async fn list_for_user(&self, user_id: i64) -> AppResult<Vec<BorrowingDetails>> {
        let rows = sqlx::query_as::<_, BorrowingDetails>(
            r#"
            SELECT b.id, bk.title, bk.cover_url, b.borrow_date, b.return_date,
                   b.user_id, b.borrower_name, b.borrower_phone
            FROM borrowings b
            JOIN books bk ON b.book_id = bk.id
            WHERE b.user_id = $1
            ORDER BY b.id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
