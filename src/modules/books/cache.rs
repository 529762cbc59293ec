use std::sync::Arc;

use tokio::sync::RwLock;

use super::models::Book;

/// Snapshot of the whole catalog.
///
/// Holds either nothing or the full list of books as last read from the
/// store. There is no TTL, size bound, or eviction: the snapshot only changes
/// through [`replace`](Self::replace) and [`invalidate`](Self::invalidate).
///
/// An empty catalog is stored like any other result but never served, so an
/// empty store is asked again on every read.
///
/// Every invalidation bumps a generation. A reader that fetched from the store
/// under an older generation cannot install its result, so a read that raced
/// a write never puts the pre-write catalog back.
#[derive(Debug, Default)]
pub struct CatalogCache {
    state: RwLock<CacheState>,
}

#[derive(Debug, Default)]
struct CacheState {
    snapshot: Option<Arc<Vec<Book>>>,
    generation: u64,
}

impl CatalogCache {
    /// Creates an unpopulated cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached catalog, if it holds at least one book.
    pub async fn snapshot(&self) -> Option<Arc<Vec<Book>>> {
        self.state
            .read()
            .await
            .snapshot
            .as_ref()
            .filter(|books| !books.is_empty())
            .cloned()
    }

    /// Current generation; read it before fetching from the store.
    pub async fn generation(&self) -> u64 {
        self.state.read().await.generation
    }

    /// Replace the snapshot wholesale if no invalidation happened since
    /// `generation` was read. Among readers of the same generation the last
    /// writer wins. Returns whether the snapshot was stored.
    pub async fn replace(&self, books: Arc<Vec<Book>>, generation: u64) -> bool {
        let mut state = self.state.write().await;
        if state.generation != generation {
            return false;
        }
        state.snapshot = Some(books);
        true
    }

    /// Drop the snapshot so the next read goes to the store.
    pub async fn invalidate(&self) {
        let mut state = self.state.write().await;
        state.snapshot = None;
        state.generation = state.generation.wrapping_add(1);
    }
}
