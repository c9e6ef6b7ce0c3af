//! Cached list of active queue entries
//!
//! Views read entries through [`QueueStore`]; anything that changes an entry
//! on the server calls [`QueueRefresher::mutate_queue_entries`] so the next
//! read goes back to the source.

use parking_lot::RwLock;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{CareQueueError, Result};
use crate::types::QueueEntry;

/// Signals that cached queue entries are stale
pub trait QueueRefresher: Send + Sync {
    fn mutate_queue_entries(&self);
}

impl<F> QueueRefresher for F
where
    F: Fn() + Send + Sync,
{
    fn mutate_queue_entries(&self) {
        self()
    }
}

/// Where the store loads entries from
pub trait QueueSource: Send + Sync {
    fn fetch_entries(&self) -> impl Future<Output = Result<Vec<QueueEntry>>> + Send;

    /// Fetch one entry, whether or not it is in the active list.
    ///
    /// The default scans [`fetch_entries`](Self::fetch_entries); sources that
    /// can address an entry directly should override it.
    fn fetch_entry(&self, uuid: &str) -> impl Future<Output = Result<QueueEntry>> + Send {
        async move {
            self.fetch_entries()
                .await?
                .into_iter()
                .find(|e| e.uuid == uuid)
                .ok_or_else(|| CareQueueError::EntryNotFound(uuid.to_string()))
        }
    }
}

impl<S: QueueSource> QueueSource for Arc<S> {
    fn fetch_entries(&self) -> impl Future<Output = Result<Vec<QueueEntry>>> + Send {
        (**self).fetch_entries()
    }

    fn fetch_entry(&self, uuid: &str) -> impl Future<Output = Result<QueueEntry>> + Send {
        (**self).fetch_entry(uuid)
    }
}

pub struct QueueStore<S> {
    source: S,
    cached: RwLock<Option<Vec<QueueEntry>>>,
    generation: AtomicU64,
}

impl<S: QueueSource> QueueStore<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cached: RwLock::new(None),
            generation: AtomicU64::new(0),
        }
    }

    /// Current entries, fetched from the source if nothing is cached.
    ///
    /// A fetch that races with an invalidation is returned to the caller but
    /// not cached.
    pub async fn entries(&self) -> Result<Vec<QueueEntry>> {
        let cached = self.cached.read().clone();
        if let Some(entries) = cached {
            return Ok(entries);
        }

        let generation = self.generation();
        let fresh = self.source.fetch_entries().await?;
        tracing::debug!(count = fresh.len(), generation, "fetched queue entries");

        if self.generation() == generation {
            *self.cached.write() = Some(fresh.clone());
        }
        Ok(fresh)
    }

    /// Look up a single entry by uuid.
    ///
    /// Served from the cache when the entry is there; otherwise asks the
    /// source for that entry alone, so entries beyond the cached list are
    /// still found.
    pub async fn find(&self, uuid: &str) -> Result<QueueEntry> {
        let cached = self
            .cached
            .read()
            .as_ref()
            .and_then(|entries| entries.iter().find(|e| e.uuid == uuid).cloned());
        if let Some(entry) = cached {
            return Ok(entry);
        }

        tracing::debug!(entry = uuid, "queue entry not cached, fetching");
        self.source.fetch_entry(uuid).await
    }

    /// Number of invalidations so far
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub fn is_cached(&self) -> bool {
        self.cached.read().is_some()
    }
}

impl<S: QueueSource> QueueRefresher for QueueStore<S> {
    fn mutate_queue_entries(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.cached.write().take();
        tracing::debug!(generation = self.generation(), "queue entries invalidated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    struct CountingSource {
        fetches: Arc<AtomicUsize>,
    }

    impl QueueSource for CountingSource {
        async fn fetch_entries(&self) -> Result<Vec<QueueEntry>> {
            let n = self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(vec![QueueEntry::new(format!("e-{n}"), "John Doe")])
        }
    }

    fn store() -> (QueueStore<CountingSource>, Arc<AtomicUsize>) {
        let fetches = Arc::new(AtomicUsize::new(0));
        let store = QueueStore::new(CountingSource {
            fetches: fetches.clone(),
        });
        (store, fetches)
    }

    #[tokio::test]
    async fn test_entries_are_cached() {
        let (store, fetches) = store();
        assert!(!store.is_cached());

        let first = store.entries().await.unwrap();
        let second = store.entries().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
        assert!(store.is_cached());
    }

    #[tokio::test]
    async fn test_mutate_forces_refetch() {
        let (store, fetches) = store();
        store.entries().await.unwrap();

        store.mutate_queue_entries();
        assert_eq!(store.generation(), 1);
        assert!(!store.is_cached());

        let entries = store.entries().await.unwrap();
        assert_eq!(entries[0].uuid, "e-1");
        assert_eq!(fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_find() {
        let (store, _) = store();
        assert_eq!(store.find("e-0").await.unwrap().display, "John Doe");
        assert!(matches!(
            store.find("missing").await,
            Err(CareQueueError::EntryNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_find_uses_cache() {
        let (store, fetches) = store();
        store.entries().await.unwrap();

        assert_eq!(store.find("e-0").await.unwrap().uuid, "e-0");
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_find_asks_source_for_uncached_entry() {
        struct DirectSource;

        impl QueueSource for DirectSource {
            async fn fetch_entries(&self) -> Result<Vec<QueueEntry>> {
                Ok(vec![QueueEntry::new("e-1", "John Doe")])
            }

            async fn fetch_entry(&self, uuid: &str) -> Result<QueueEntry> {
                Ok(QueueEntry::new(uuid, "Jane Roe"))
            }
        }

        let store = QueueStore::new(DirectSource);
        store.entries().await.unwrap();

        let entry = store.find("e-51").await.unwrap();
        assert_eq!(entry.uuid, "e-51");
        assert_eq!(entry.display, "Jane Roe");
    }

    #[test]
    fn test_closure_refresher() {
        let calls = AtomicUsize::new(0);
        let refresher = || {
            calls.fetch_add(1, Ordering::SeqCst);
        };
        refresher.mutate_queue_entries();
        refresher.mutate_queue_entries();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
