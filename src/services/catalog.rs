//! Catalog management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, UpsertBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List the whole catalog
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    /// Create or update a book; an `id` in the request selects update mode.
    /// Returns the persisted book and whether it was newly created.
    pub async fn upsert_book(&self, book: UpsertBook) -> AppResult<(Book, bool)> {
        book.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        match book.id {
            Some(id) => {
                let updated = self.repository.books.update(id, &book).await?;
                Ok((updated, false))
            }
            None => {
                let created = self.repository.books.create(&book).await?;
                Ok((created, true))
            }
        }
    }

    /// Delete a book; refused while any of its loans is still open
    pub async fn delete_book(&self, id: i64) -> AppResult<()> {
        self.repository.books.delete(id).await
    }
}
