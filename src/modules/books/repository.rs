//! Cache-aside repository for the catalog.
//!
//! Reads are served from the [`CatalogCache`] when it holds books and fall
//! through to the store otherwise, refilling the cache. Writes go straight to
//! the store. Whether a write also drops the snapshot is decided by
//! `invalidate_on_write`; without it, a populated snapshot stays stale until
//! the process restarts.
//!
//! Two reads that miss at the same time both fetch from the store and both
//! refill the cache; the later one wins. A read that overlaps an invalidating
//! write does not refill the cache, so the next read refetches.

use std::sync::Arc;

use super::{
    accessor::BookAccessor,
    cache::CatalogCache,
    error::BookError,
    models::{Book, BookDocument, BookFields},
};

pub struct BookRepository {
    accessor: BookAccessor,
    cache: Arc<CatalogCache>,
    invalidate_on_write: bool,
}

impl BookRepository {
    pub fn new(accessor: BookAccessor, cache: Arc<CatalogCache>, invalidate_on_write: bool) -> Self {
        Self {
            accessor,
            cache,
            invalidate_on_write,
        }
    }

    pub async fn list_all(&self) -> Result<Arc<Vec<Book>>, BookError> {
        if let Some(books) = self.cache.snapshot().await {
            tracing::info!(count = books.len(), "books served from cache");
            return Ok(books);
        }

        let generation = self.cache.generation().await;
        let books = Arc::new(self.accessor.list().await?);
        if !self.cache.replace(books.clone(), generation).await {
            tracing::debug!("catalog changed during fetch, cache left empty");
        }
        tracing::info!(count = books.len(), "books fetched from store");
        Ok(books)
    }

    pub async fn create(&self, document: BookDocument) -> Result<Book, BookError> {
        let book = self.accessor.create(document).await?;
        self.after_write().await;
        Ok(book)
    }

    pub async fn update(&self, id: &str, fields: BookFields) -> Result<Option<Book>, BookError> {
        let book = self.accessor.update(id, fields).await?;
        if book.is_some() {
            self.after_write().await;
        }
        Ok(book)
    }

    pub async fn delete(&self, id: &str) -> Result<Option<Book>, BookError> {
        let book = self.accessor.delete(id).await?;
        if book.is_some() {
            self.after_write().await;
        }
        Ok(book)
    }

    async fn after_write(&self) {
        if self.invalidate_on_write {
            self.cache.invalidate().await;
            tracing::debug!("catalog cache invalidated after write");
        }
    }
}
