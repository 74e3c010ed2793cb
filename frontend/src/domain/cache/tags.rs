//! Cache tags and their invalidation generations.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::domain::ResourceKind;

/// Per-tag generation counters.
///
/// An entry cached under generation `g` is valid while the tag's current
/// generation is still `g`. Invalidation bumps the generation, which marks
/// every entry under the tag invalid at once without deleting any of them.
#[derive(Debug, Default)]
pub struct TagRegistry {
    generations: [AtomicU64; ResourceKind::ALL.len()],
}

impl TagRegistry {
    /// Fresh registry with every tag at generation zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current generation of `kind`.
    pub fn current(&self, kind: ResourceKind) -> u64 {
        self.slot(kind).load(Ordering::SeqCst)
    }

    /// Mark every entry under `kind` invalid; returns the new generation.
    pub fn invalidate(&self, kind: ResourceKind) -> u64 {
        let next = self.slot(kind).fetch_add(1, Ordering::SeqCst).saturating_add(1);
        debug!(tag = %kind, generation = next, "cache tag invalidated");
        next
    }

    /// Invalidate every tag in `set`.
    pub fn invalidate_all(&self, set: &InvalidationSet) {
        for kind in set.iter() {
            self.invalidate(kind);
        }
    }

    fn slot(&self, kind: ResourceKind) -> &AtomicU64 {
        // `index` is dense over `ALL`, so the slot always exists.
        &self.generations[kind.index()]
    }
}

/// Tags a mutation declares it affects.
///
/// The resource's own tag is always part of the set; related tags are added
/// explicitly per mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidationSet(BTreeSet<ResourceKind>);

impl InvalidationSet {
    /// Just the mutated resource's own tag.
    pub fn of(kind: ResourceKind) -> Self {
        Self(BTreeSet::from([kind]))
    }

    /// Add a related tag.
    #[must_use]
    pub fn with(mut self, kind: ResourceKind) -> Self {
        self.0.insert(kind);
        self
    }

    /// Whether `kind` is part of the set.
    pub fn contains(&self, kind: ResourceKind) -> bool {
        self.0.contains(&kind)
    }

    /// Tags in index order.
    pub fn iter(&self) -> impl Iterator<Item = ResourceKind> + '_ {
        self.0.iter().copied()
    }
}
