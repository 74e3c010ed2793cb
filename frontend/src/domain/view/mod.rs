//! Derived views: cached collection + filters → rows and dashboard summary.
//!
//! [`project`] is pure. Rows are the filtered (and optionally id-sorted)
//! subset of the collection; aggregates are reduced over the *whole*
//! collection so the summary never moves while the user types a search.

mod filters;
mod list_view;
mod records;

use std::collections::BTreeMap;
use std::fmt;

use super::{Amount, Resource, UserRole};

pub use filters::{
    ParseSortOrderError, ParseStatusFilterError, RoleFilter, SortOrder, StatusFilter, ViewFilters,
};
pub use list_view::{ListView, ViewHandle, ViewSnapshot};

/// Per-resource hooks the projection reads.
///
/// Defaults describe a resource with no status, amount, role or rating.
pub trait ViewRecord: Resource {
    /// Text fields the search box matches against.
    fn search_fields(&self) -> Vec<&str>;

    /// The binary status partitioned by [`StatusFilter`].
    fn status_flag(&self) -> Option<bool> {
        None
    }

    /// Money summed into [`Aggregates::amount`] when the status is `true`.
    fn tallied_amount(&self) -> Option<Amount> {
        None
    }

    /// Account role partitioned by [`RoleFilter`].
    fn role(&self) -> Option<UserRole> {
        None
    }

    /// Star rating averaged into [`Aggregates::rating`].
    fn rating(&self) -> Option<u32> {
        None
    }
}

/// Sum and count of ratings, kept integral.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingSummary {
    /// Sum of all ratings.
    pub sum: u64,
    /// Number of rated records.
    pub count: u64,
}

impl RatingSummary {
    /// Mean rating in tenths (e.g. `43` for 4.3), rounded half up.
    pub fn mean_tenths(self) -> Option<u64> {
        let scaled = self.sum.checked_mul(20)?.checked_add(self.count)?;
        scaled.checked_div(self.count.checked_mul(2)?)
    }
}

impl fmt::Display for RatingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mean_tenths() {
            Some(tenths) => write!(
                f,
                "{}.{}",
                tenths.checked_div(10).unwrap_or(0),
                tenths.checked_rem(10).unwrap_or(0)
            ),
            None => f.write_str("n/a"),
        }
    }
}

/// Dashboard summary reduced over the unfiltered collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregates {
    /// Records in the collection.
    pub total: usize,
    /// Records whose status is `true`.
    pub positive: usize,
    /// Records whose status is `false`.
    pub negative: usize,
    /// Sum of the tallied amount over records whose status is `true`.
    pub amount: Amount,
    /// Records per role.
    pub roles: BTreeMap<UserRole, usize>,
    /// Rating totals.
    pub rating: RatingSummary,
}

impl Aggregates {
    /// Reduce `collection`.
    pub fn over<R: ViewRecord>(collection: &[R]) -> Self {
        let mut aggregates = Self {
            total: collection.len(),
            ..Self::default()
        };
        for record in collection {
            match record.status_flag() {
                Some(true) => {
                    aggregates.positive = aggregates.positive.saturating_add(1);
                    if let Some(amount) = record.tallied_amount() {
                        aggregates.amount = aggregates.amount.saturating_add(amount);
                    }
                }
                Some(false) => aggregates.negative = aggregates.negative.saturating_add(1),
                None => {}
            }
            if let Some(role) = record.role() {
                let count = aggregates.roles.entry(role).or_insert(0);
                *count = count.saturating_add(1);
            }
            if let Some(rating) = record.rating() {
                aggregates.rating.sum = aggregates.rating.sum.saturating_add(u64::from(rating));
                aggregates.rating.count = aggregates.rating.count.saturating_add(1);
            }
        }
        aggregates
    }

    /// Records with `role`.
    pub fn role_count(&self, role: UserRole) -> usize {
        self.roles.get(&role).copied().unwrap_or(0)
    }
}

/// Rows to display plus the summary.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection<'a, R> {
    /// Records passing every filter, in server order unless sorted.
    pub rows: Vec<&'a R>,
    /// Summary over the whole collection.
    pub aggregates: Aggregates,
}

/// Whether `record` passes `filters`.
pub fn matches<R: ViewRecord>(record: &R, filters: &ViewFilters, needle: &str) -> bool {
    let searched = needle.is_empty()
        || record
            .search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(needle));
    let status_ok = record
        .status_flag()
        .is_none_or(|status| filters.status.admits(status));
    let role_ok = record.role().is_none_or(|role| filters.role.admits(role));
    searched && status_ok && role_ok
}

/// Filter, sort and summarise `collection`.
pub fn project<'a, R: ViewRecord>(collection: &'a [R], filters: &ViewFilters) -> Projection<'a, R> {
    let needle = filters.search.to_lowercase();
    let mut rows: Vec<&R> = collection
        .iter()
        .filter(|record| matches(*record, filters, &needle))
        .collect();
    match filters.order {
        Some(SortOrder::Ascending) => rows.sort_by_key(|record| record.id()),
        Some(SortOrder::Descending) => rows.sort_by_key(|record| std::cmp::Reverse(record.id())),
        None => {}
    }
    Projection {
        rows,
        aggregates: Aggregates::over(collection),
    }
}

#[cfg(test)]
mod tests;
