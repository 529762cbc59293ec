//! Store access for books.
//!
//! Every store failure is caught here, logged, and turned into a
//! [`BookError::Store`]; nothing above this layer sees a [`StoreError`].

use std::sync::Arc;

use bookhouse_db::{Store, StoreError};

use super::{
    error::{BookError, BookOperation},
    models::{Book, BookDocument, BookFields},
};

#[derive(Clone)]
pub struct BookAccessor {
    store: Arc<dyn Store<BookDocument>>,
}

impl BookAccessor {
    pub fn new(store: Arc<dyn Store<BookDocument>>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Book>, BookError> {
        self.store
            .find_all()
            .await
            .map_err(|err| store_failure(BookOperation::List, err))
    }

    pub async fn create(&self, document: BookDocument) -> Result<Book, BookError> {
        self.store
            .insert(document)
            .await
            .map_err(|err| store_failure(BookOperation::Create, err))
    }

    /// `Ok(None)` when no book has `id`.
    pub async fn update(&self, id: &str, fields: BookFields) -> Result<Option<Book>, BookError> {
        self.store
            .find_by_id_and_update(id, fields)
            .await
            .map_err(|err| store_failure(BookOperation::Update, err))
    }

    /// `Ok(None)` when no book has `id`.
    pub async fn delete(&self, id: &str) -> Result<Option<Book>, BookError> {
        self.store
            .find_by_id_and_delete(id)
            .await
            .map_err(|err| store_failure(BookOperation::Delete, err))
    }
}

fn store_failure(operation: BookOperation, err: StoreError) -> BookError {
    let message = if err.message().trim().is_empty() {
        operation.default_failure_message().to_string()
    } else {
        err.to_string()
    };

    tracing::error!(?operation, error = %err, "book store operation failed");

    BookError::Store { operation, message }
}


#[cfg(test)]
mod tests {
    use super::testing::FailingStore;
    use super::*;
    use bookhouse_db::MemoryStore;
    use time::OffsetDateTime;

    fn document(name: &str) -> BookDocument {
        BookDocument {
            name: name.to_string(),
            description: "A study".to_string(),
            author: "Anon".to_string(),
            publication: 1999,
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    fn failing(err: StoreError) -> BookAccessor {
        BookAccessor::new(Arc::new(FailingStore(err)))
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let accessor = BookAccessor::new(Arc::new(MemoryStore::new()));
        let created = accessor.create(document("Emma")).await.unwrap();

        assert_eq!(accessor.list().await.unwrap(), vec![created]);
    }

    #[tokio::test]
    async fn test_missing_book_is_not_a_failure() {
        let accessor = BookAccessor::new(Arc::new(MemoryStore::new()));

        let fields = BookFields {
            name: "x".to_string(),
            description: "y".to_string(),
            author: "z".to_string(),
            publication: 1,
        };
        assert_eq!(accessor.update("nope", fields).await, Ok(None));
        assert_eq!(accessor.delete("nope").await, Ok(None));
    }

    #[tokio::test]
    async fn test_store_message_is_kept() {
        let accessor = failing(StoreError::Query("write conflict".to_string()));

        assert_eq!(
            accessor.create(document("Emma")).await,
            Err(BookError::Store {
                operation: BookOperation::Create,
                message: "query failed: write conflict".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_default_messages_when_store_is_silent() {
        let accessor = failing(StoreError::Connection(String::new()));

        let list = accessor.list().await.unwrap_err();
        assert_eq!(list.to_string(), "Failed to retrieve all the books.");

        let create = accessor.create(document("Emma")).await.unwrap_err();
        assert_eq!(create.to_string(), "Failed to add the book.");

        let update = accessor
            .update("id", BookFields::default())
            .await
            .unwrap_err();
        assert_eq!(update.to_string(), "Failed to update the book.");

        let delete = accessor.delete("id").await.unwrap_err();
        assert_eq!(delete.to_string(), "Failed to delete the book.");
    }
}
