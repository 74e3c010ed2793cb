//! Cache layer: last-known server collections per resource tag.
//!
//! Reads are served from memory while the entry's generation matches the
//! tag's current generation; otherwise the collection is refetched and
//! replaced wholesale. There is no TTL. Invalid entries stay readable through
//! [`ResourceCache::peek`] so views can keep showing the previous rows while a
//! refetch is in flight.

mod tags;

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

use super::ports::{ApiError, EntityClient};
use super::{EntityId, ParentKind, Resource};

pub use tags::{InvalidationSet, TagRegistry};

/// Which collection of a resource an entry holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheScope {
    /// The whole collection (`list`).
    All,
    /// Records of one parent (`get_by_parent`).
    Parent(ParentKind, EntityId),
}

impl fmt::Display for CacheScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Parent(kind, id) => write!(f, "{kind}/{id}"),
        }
    }
}

/// Whether a snapshot is still valid for its tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Matches the tag's current generation.
    Fresh,
    /// Invalidated since it was fetched; the next read refetches.
    Stale,
}

/// Cached rows plus their validity at the time of the peek.
#[derive(Debug, Clone)]
pub struct Snapshot<R> {
    /// Rows exactly as the server returned them.
    pub rows: Arc<[R]>,
    /// Validity of the rows.
    pub freshness: Freshness,
}

#[derive(Debug)]
struct CacheEntry<R> {
    rows: Arc<[R]>,
    generation: u64,
}

/// Cache of one resource type's collections, keyed by [`CacheScope`].
pub struct ResourceCache<R: Resource> {
    client: Arc<dyn EntityClient<R>>,
    tags: Arc<TagRegistry>,
    entries: Mutex<HashMap<CacheScope, CacheEntry<R>>>,
}

impl<R: Resource> fmt::Debug for ResourceCache<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceCache")
            .field("kind", &R::KIND)
            .finish_non_exhaustive()
    }
}

impl<R: Resource> ResourceCache<R> {
    /// Cache backed by `client`, validated against `tags`.
    pub fn new(client: Arc<dyn EntityClient<R>>, tags: Arc<TagRegistry>) -> Self {
        Self {
            client,
            tags,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Client used for fetches; mutation flows share it.
    pub fn client(&self) -> Arc<dyn EntityClient<R>> {
        Arc::clone(&self.client)
    }

    /// Tag registry this cache validates against.
    pub fn tags(&self) -> Arc<TagRegistry> {
        Arc::clone(&self.tags)
    }

    /// Return the collection for `scope`, fetching it when the cached copy is
    /// missing or invalid.
    ///
    /// The tag generation is captured before the request is issued. If the
    /// tag is invalidated while the request is in flight, the result is still
    /// stored and returned but stays stale, so the next read refetches.
    pub async fn read(&self, scope: CacheScope) -> Result<Arc<[R]>, ApiError> {
        let generation = self.tags.current(R::KIND);
        if let Some(rows) = self.valid_rows(scope, generation) {
            debug!(tag = %R::KIND, %scope, "cache hit");
            return Ok(rows);
        }

        debug!(tag = %R::KIND, %scope, "cache miss; fetching");
        let fetched = match scope {
            CacheScope::All => self.client.list().await?,
            CacheScope::Parent(parent, id) => self.client.get_by_parent(parent, id).await?,
        };
        let rows: Arc<[R]> = fetched.into();
        self.store(scope, Arc::clone(&rows), generation);
        if self.tags.current(R::KIND) != generation {
            debug!(tag = %R::KIND, %scope, "tag invalidated during fetch; entry kept stale");
        }
        Ok(rows)
    }

    /// Cached rows for `scope` without fetching, valid or not.
    pub fn peek(&self, scope: CacheScope) -> Option<Snapshot<R>> {
        let current = self.tags.current(R::KIND);
        self.lock().get(&scope).map(|entry| Snapshot {
            rows: Arc::clone(&entry.rows),
            freshness: if entry.generation == current {
                Freshness::Fresh
            } else {
                Freshness::Stale
            },
        })
    }

    /// Fetch one record directly; single records are not cached.
    pub async fn fetch_one(&self, id: EntityId) -> Result<R, ApiError> {
        self.client.get_by_id(id).await
    }

    /// Invalidate this resource's tag.
    pub fn invalidate(&self) {
        self.tags.invalidate(R::KIND);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<CacheScope, CacheEntry<R>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn valid_rows(&self, scope: CacheScope, generation: u64) -> Option<Arc<[R]>> {
        self.lock()
            .get(&scope)
            .filter(|entry| entry.generation == generation)
            .map(|entry| Arc::clone(&entry.rows))
    }

    fn store(&self, scope: CacheScope, rows: Arc<[R]>, generation: u64) {
        let mut entries = self.lock();
        // A slower, older fetch must not overwrite a newer one.
        if entries
            .get(&scope)
            .is_some_and(|existing| existing.generation > generation)
        {
            debug!(tag = %R::KIND, %scope, "discarding result older than cached entry");
            return;
        }
        entries.insert(scope, CacheEntry { rows, generation });
    }
}

#[cfg(test)]
mod tests;
