//! Loan management service

use crate::{
    error::AppResult,
    models::{
        account::Claims,
        borrowing::{BorrowingDetails, CreateBorrowing},
    },
    repository::Repository,
    time,
};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
}

impl LoansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Borrow one copy of a book for the calling user
    pub async fn borrow(
        &self,
        caller: &Claims,
        book_id: i64,
        borrower_name: String,
        borrower_phone: String,
    ) -> AppResult<i64> {
        let loan = CreateBorrowing {
            book_id,
            user_id: caller.id,
            borrower_name,
            borrower_phone,
            borrow_date: time::now(),
        };

        let borrowing_id = self.repository.borrowings.create(&loan).await?;
        tracing::info!("User {} borrowed book {} (loan {})", caller.id, book_id, borrowing_id);
        Ok(borrowing_id)
    }

    /// Return an open loan
    pub async fn return_loan(&self, caller: &Claims, borrowing_id: i64) -> AppResult<()> {
        self.repository.borrowings.close(borrowing_id).await?;
        tracing::info!("User {} returned loan {}", caller.id, borrowing_id);
        Ok(())
    }

    /// List borrowing history: admins see everything, users only their own
    pub async fn list_borrowings(&self, caller: &Claims) -> AppResult<Vec<BorrowingDetails>> {
        if caller.is_admin() {
            self.repository.borrowings.list_all().await
        } else {
            self.repository.borrowings.list_for_user(caller.id).await
        }
    }
}
