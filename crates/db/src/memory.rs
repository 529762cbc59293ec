//! In-memory store engine.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{Document, Store, StoreResult, Stored};

/// Insertion-ordered collection held in process memory.
///
/// Identifiers are UUID v7 strings, so they sort in insertion order too.
/// Data is lost when the last clone is dropped.
#[derive(Debug)]
pub struct MemoryStore<D> {
    records: Arc<RwLock<Vec<Stored<D>>>>,
}

impl<D> Clone for MemoryStore<D> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

impl<D> Default for MemoryStore<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> MemoryStore<D> {
    /// Creates a new empty collection.
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

#[async_trait]
impl<D: Document> Store<D> for MemoryStore<D> {
    async fn find_all(&self) -> StoreResult<Vec<Stored<D>>> {
        Ok(self.records.read().await.clone())
    }

    async fn find_one(&self, id: &str) -> StoreResult<Option<Stored<D>>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    async fn insert(&self, document: D) -> StoreResult<Stored<D>> {
        let stored = Stored {
            id: Uuid::now_v7().to_string(),
            document,
        };
        self.records.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id_and_update(
        &self,
        id: &str,
        patch: D::Patch,
    ) -> StoreResult<Option<Stored<D>>> {
        let mut records = self.records.write().await;
        let Some(record) = records.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        record.document.apply(patch);
        Ok(Some(record.clone()))
    }

    async fn find_by_id_and_delete(&self, id: &str) -> StoreResult<Option<Stored<D>>> {
        let mut records = self.records.write().await;
        let position = records.iter().position(|r| r.id == id);
        Ok(position.map(|index| records.remove(index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Counter {
        label: String,
        value: i64,
    }

    impl Document for Counter {
        type Patch = i64;

        fn apply(&mut self, patch: i64) {
            self.value = patch;
        }
    }

    fn counter(label: &str, value: i64) -> Counter {
        Counter {
            label: label.to_string(),
            value,
        }
    }

    #[tokio::test]
    async fn test_find_all_keeps_insertion_order() {
        let store = MemoryStore::new();
        let first = store.insert(counter("a", 1)).await.unwrap();
        let second = store.insert(counter("b", 2)).await.unwrap();

        let all = store.find_all().await.unwrap();
        assert_eq!(all, vec![first, second]);
    }

    #[tokio::test]
    async fn test_insert_assigns_distinct_ids() {
        let store = MemoryStore::new();
        let first = store.insert(counter("a", 1)).await.unwrap();
        let second = store.insert(counter("a", 1)).await.unwrap();
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_find_one() {
        let store = MemoryStore::new();
        let inserted = store.insert(counter("a", 1)).await.unwrap();

        assert_eq!(store.find_one(&inserted.id).await.unwrap(), Some(inserted));
        assert_eq!(store.find_one("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_applies_patch_and_returns_updated() {
        let store = MemoryStore::new();
        let inserted = store.insert(counter("a", 1)).await.unwrap();

        let updated = store
            .find_by_id_and_update(&inserted.id, 5)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.id, inserted.id);
        assert_eq!(updated.document, counter("a", 5));
        assert_eq!(store.find_one(&inserted.id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let store = MemoryStore::<Counter>::new();
        assert_eq!(store.find_by_id_and_update("missing", 5).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_returns_removed_record() {
        let store = MemoryStore::new();
        let kept = store.insert(counter("a", 1)).await.unwrap();
        let removed = store.insert(counter("b", 2)).await.unwrap();

        let deleted = store.find_by_id_and_delete(&removed.id).await.unwrap();
        assert_eq!(deleted, Some(removed.clone()));
        assert_eq!(store.find_all().await.unwrap(), vec![kept]);
        assert_eq!(store.find_by_id_and_delete(&removed.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clones_share_records() {
        let store = MemoryStore::new();
        let handle = store.clone();
        handle.insert(counter("a", 1)).await.unwrap();
        assert_eq!(store.find_all().await.unwrap().len(), 1);
    }
}
