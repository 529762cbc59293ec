//! Document store contract used by application modules, plus the store
//! factory that picks an engine from `database.endpoint`.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use bookhouse_kernel::settings::DatabaseSettings;

pub mod memory;

pub use memory::MemoryStore;

/// Errors surfaced by a store engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("connection failed: {0}")]
    Connection(String),
    #[error("query failed: {0}")]
    Query(String),
}

impl StoreError {
    /// Message supplied by the engine, without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            StoreError::Connection(message) | StoreError::Query(message) => message,
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// A value that can be persisted in a [`Store`].
///
/// `Patch` is what `find_by_id_and_update` receives; applying it must leave
/// fields it does not carry untouched.
pub trait Document: Clone + Send + Sync + 'static {
    type Patch: Send + 'static;

    fn apply(&mut self, patch: Self::Patch);
}

/// A document together with its store-assigned identifier.
///
/// Serializes flat: `{"id": ..., <document fields>}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stored<D> {
    pub id: String,
    #[serde(flatten)]
    pub document: D,
}

/// CRUD gateway to a persistent collection.
///
/// `None` from the update and delete calls means no record has that id.
#[async_trait]
pub trait Store<D: Document>: Send + Sync {
    async fn find_all(&self) -> StoreResult<Vec<Stored<D>>>;

    async fn find_one(&self, id: &str) -> StoreResult<Option<Stored<D>>>;

    async fn insert(&self, document: D) -> StoreResult<Stored<D>>;

    /// Apply `patch` and return the record as it is after the update.
    async fn find_by_id_and_update(
        &self,
        id: &str,
        patch: D::Patch,
    ) -> StoreResult<Option<Stored<D>>>;

    /// Remove the record and return it.
    async fn find_by_id_and_delete(&self, id: &str) -> StoreResult<Option<Stored<D>>>;
}

/// Open a store for `D` at the configured endpoint.
///
/// Only `memory://` endpoints are supported; each call opens an independent
/// collection.
pub fn connect<D: Document>(settings: &DatabaseSettings) -> StoreResult<Arc<dyn Store<D>>> {
    let (scheme, name) = settings.endpoint.split_once("://").ok_or_else(|| {
        StoreError::Connection(format!("malformed endpoint '{}'", settings.endpoint))
    })?;

    match scheme {
        "memory" => {
            tracing::info!(target: "bookhouse-db", database = name, "connected to database");
            Ok(Arc::new(MemoryStore::<D>::new()))
        }
        other => Err(StoreError::Connection(format!(
            "unsupported store scheme '{}'",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        text: String,
    }

    impl Document for Note {
        type Patch = String;

        fn apply(&mut self, patch: String) {
            self.text = patch;
        }
    }

    fn settings(endpoint: &str) -> DatabaseSettings {
        DatabaseSettings {
            endpoint: endpoint.to_string(),
        }
    }

    #[test]
    fn store_error_message_strips_prefix() {
        let err = StoreError::Query("duplicate key".to_string());
        assert_eq!(err.to_string(), "query failed: duplicate key");
        assert_eq!(err.message(), "duplicate key");
    }

    #[test]
    fn stored_serializes_flat() {
        let stored = Stored {
            id: "n-1".to_string(),
            document: Note {
                text: "hello".to_string(),
            },
        };
        let value = serde_json::to_value(&stored).unwrap();
        assert_eq!(value, serde_json::json!({"id": "n-1", "text": "hello"}));
    }

    #[tokio::test]
    async fn connect_opens_memory_store() {
        let store = connect::<Note>(&settings("memory://test")).unwrap();
        let inserted = store
            .insert(Note {
                text: "a".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(store.find_all().await.unwrap(), vec![inserted]);
    }

    #[test]
    fn connect_rejects_unknown_scheme() {
        let err = connect::<Note>(&settings("mongodb://localhost:27017/books"))
            .err()
            .unwrap();
        assert_eq!(
            err,
            StoreError::Connection("unsupported store scheme 'mongodb'".to_string())
        );
    }

    #[test]
    fn connect_rejects_malformed_endpoint() {
        let err = connect::<Note>(&settings("localhost")).err().unwrap();
        assert!(matches!(err, StoreError::Connection(_)));
    }
}
