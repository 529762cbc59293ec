use std::sync::Arc;

use time::OffsetDateTime;

use super::{
    error::BookError,
    models::{Book, BookDocument, BookFields},
    repository::BookRepository,
};

/// Business rules for the catalog.
///
/// Rule violations come back as [`BookError::Policy`] after being logged;
/// store failures pass through untouched.
pub struct BookService {
    repository: BookRepository,
}

impl BookService {
    pub fn new(repository: BookRepository) -> Self {
        Self { repository }
    }

    pub async fn list_all(&self) -> Result<Arc<Vec<Book>>, BookError> {
        self.repository.list_all().await
    }

    /// Stamps `createdAt` with the current time.
    pub async fn create(&self, fields: BookFields) -> Result<Book, BookError> {
        if fields.is_empty() {
            return Err(policy_failure("All details are needed to create the book"));
        }

        let document = BookDocument::new(fields, OffsetDateTime::now_utc());
        self.repository.create(document).await
    }

    /// `Ok(None)` when no book has `id`.
    pub async fn update(&self, id: &str, fields: BookFields) -> Result<Option<Book>, BookError> {
        if fields.is_empty() {
            return Err(policy_failure("All details are needed to update the book"));
        }

        self.repository.update(id, fields).await
    }

    /// `Ok(None)` when no book has `id`.
    pub async fn delete(&self, id: &str) -> Result<Option<Book>, BookError> {
        if id.trim().is_empty() {
            return Err(policy_failure("Book ID is needed to delete the book"));
        }

        self.repository.delete(id).await
    }
}

fn policy_failure(message: &str) -> BookError {
    tracing::error!("{}", message);
    BookError::policy(message)
}
