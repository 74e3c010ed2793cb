//! A list screen bound to one cached collection.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use super::{Projection, ViewFilters, ViewRecord, project};
use crate::domain::cache::{CacheScope, ResourceCache};
use crate::domain::ports::ApiError;

/// Closes a [`ListView`] from elsewhere, e.g. when the user navigates away.
#[derive(Debug, Clone)]
pub struct ViewHandle {
    active: Arc<AtomicBool>,
}

impl ViewHandle {
    /// Mark the view inactive; loads still in flight discard their result.
    pub fn close(&self) {
        self.active.store(false, Ordering::SeqCst);
    }

    /// Whether the view is still shown.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

/// Rows read for a view together with the filters in force.
#[derive(Debug, Clone)]
pub struct ViewSnapshot<R> {
    rows: Arc<[R]>,
    filters: ViewFilters,
}

impl<R: ViewRecord> ViewSnapshot<R> {
    /// Project the rows through the filters.
    pub fn projection(&self) -> Projection<'_, R> {
        project(&self.rows, &self.filters)
    }

    /// The unfiltered collection.
    pub fn collection(&self) -> &[R] {
        &self.rows
    }
}

/// One list screen: a cache scope plus the user's filters.
///
/// Loads never cancel the underlying request; a result that arrives after
/// the view was closed is dropped instead of being shown.
#[derive(Debug)]
pub struct ListView<R: ViewRecord> {
    cache: Arc<ResourceCache<R>>,
    scope: CacheScope,
    filters: ViewFilters,
    active: Arc<AtomicBool>,
}

impl<R: ViewRecord> ListView<R> {
    /// Open a view over `scope` of `cache`.
    pub fn open(cache: Arc<ResourceCache<R>>, scope: CacheScope, filters: ViewFilters) -> Self {
        Self {
            cache,
            scope,
            filters,
            active: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Handle that can close this view.
    pub fn handle(&self) -> ViewHandle {
        ViewHandle {
            active: Arc::clone(&self.active),
        }
    }

    /// Replace the filters; rows are recomputed on the next projection.
    pub fn set_filters(&mut self, filters: ViewFilters) {
        self.filters = filters;
    }

    /// Current filters.
    pub fn filters(&self) -> &ViewFilters {
        &self.filters
    }

    /// Read the collection through the cache.
    ///
    /// Returns `Ok(None)` when the view was closed before the read finished.
    pub async fn load(&self) -> Result<Option<ViewSnapshot<R>>, ApiError> {
        let rows = self.cache.read(self.scope).await?;
        if !self.active.load(Ordering::SeqCst) {
            debug!(tag = %R::KIND, scope = %self.scope, "view closed; dropping loaded rows");
            return Ok(None);
        }
        Ok(Some(ViewSnapshot {
            rows,
            filters: self.filters.clone(),
        }))
    }

    /// Rows already cached for this view, valid or not, without fetching.
    pub fn cached(&self) -> Option<ViewSnapshot<R>> {
        self.cache.peek(self.scope).map(|snapshot| ViewSnapshot {
            rows: snapshot.rows,
            filters: self.filters.clone(),
        })
    }
}
