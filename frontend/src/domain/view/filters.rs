//! Filter settings a list screen applies to its collection.

use std::fmt;
use std::str::FromStr;

use crate::domain::{ParseUserRoleError, ResourceKind, UserRole};

/// Three-state partition over a record's boolean status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    /// Keep every record.
    #[default]
    All,
    /// Keep records whose status equals the flag.
    Only(bool),
}

impl StatusFilter {
    /// Whether a record with `status` passes.
    pub fn admits(self, status: bool) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }

    /// Parse `all`, `true`, `false` or one of `kind`'s display labels
    /// (`confirmed`, `pending`, ...).
    pub fn parse_for(kind: ResourceKind, raw: &str) -> Result<Self, ParseStatusFilterError> {
        let lowered = raw.trim().to_ascii_lowercase();
        if let Ok(filter) = lowered.parse() {
            return Ok(filter);
        }
        match kind.status_labels() {
            Some((yes, _)) if lowered == yes => Ok(Self::Only(true)),
            Some((_, no)) if lowered == no => Ok(Self::Only(false)),
            _ => Err(ParseStatusFilterError(raw.to_owned())),
        }
    }
}

/// Error returned when a status filter is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status filter '{0}'; expected all|true|false")]
pub struct ParseStatusFilterError(String);

impl FromStr for StatusFilter {
    type Err = ParseStatusFilterError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "true" => Ok(Self::Only(true)),
            "false" => Ok(Self::Only(false)),
            _ => Err(ParseStatusFilterError(raw.to_owned())),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(flag) => write!(f, "{flag}"),
        }
    }
}

/// Role filter for the users screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RoleFilter {
    /// Keep every account.
    #[default]
    All,
    /// Keep accounts with this role.
    Only(UserRole),
}

impl RoleFilter {
    /// Whether an account with `role` passes.
    pub fn admits(self, role: UserRole) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == role,
        }
    }
}

impl FromStr for RoleFilter {
    type Err = ParseUserRoleError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        raw.parse().map(Self::Only)
    }
}

/// Optional ordering by record id. Without one, server order is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Smallest id first.
    Ascending,
    /// Largest id first.
    Descending,
}

/// Error returned when a sort order is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort order '{0}'; expected asc|desc")]
pub struct ParseSortOrderError(String);

impl FromStr for SortOrder {
    type Err = ParseSortOrderError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => Err(ParseSortOrderError(raw.to_owned())),
        }
    }
}

/// Everything a list screen lets the user filter by.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewFilters {
    /// Case-insensitive substring matched against the resource's search
    /// fields. Empty matches everything.
    pub search: String,
    /// Status partition; ignored for resources without a status flag.
    pub status: StatusFilter,
    /// Role partition; ignored for resources without a role.
    pub role: RoleFilter,
    /// Optional id ordering.
    pub order: Option<SortOrder>,
}

impl ViewFilters {
    /// Filters matching `search` with every other setting at its default.
    pub fn searching(search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ResourceKind::Bookings, "confirmed", StatusFilter::Only(true))]
    #[case(ResourceKind::Bookings, "Cancelled", StatusFilter::Only(false))]
    #[case(ResourceKind::Payments, "pending", StatusFilter::Only(false))]
    #[case(ResourceKind::Rooms, "available", StatusFilter::Only(true))]
    #[case(ResourceKind::Hostels, "ALL", StatusFilter::All)]
    #[case(ResourceKind::Reviews, "false", StatusFilter::Only(false))]
    fn parses_generic_and_resource_labels(
        #[case] kind: ResourceKind,
        #[case] raw: &str,
        #[case] expected: StatusFilter,
    ) {
        assert_eq!(StatusFilter::parse_for(kind, raw).expect("known filter"), expected);
    }

    #[rstest]
    fn rejects_labels_of_other_resources() {
        assert!(StatusFilter::parse_for(ResourceKind::Rooms, "confirmed").is_err());
    }

    #[rstest]
    #[case("all", RoleFilter::All)]
    #[case("landlord", RoleFilter::Only(UserRole::Landlord))]
    fn parses_role_filters(#[case] raw: &str, #[case] expected: RoleFilter) {
        assert_eq!(raw.parse::<RoleFilter>().expect("known role"), expected);
    }

    #[rstest]
    fn all_admits_both_states() {
        assert!(StatusFilter::All.admits(true));
        assert!(StatusFilter::All.admits(false));
        assert!(!StatusFilter::Only(true).admits(false));
    }
}
