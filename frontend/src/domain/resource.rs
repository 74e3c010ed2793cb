//! Resource kinds, identifiers and the shared [`Resource`] contract.
//!
//! Every entity the marketplace API exposes is a flat record keyed by an
//! integer id the server assigns. [`ResourceKind`] doubles as the cache tag for
//! that entity type.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Server-assigned, immutable record identifier.
///
/// The frontend never invents ids; values only arrive through API responses
/// or user input naming an existing record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(u64);

impl EntityId {
    /// Wrap a raw id received from the API or typed by the user.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw numeric value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntityId {
    type Err = std::num::ParseIntError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value.trim().parse().map(Self)
    }
}

impl From<u64> for EntityId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// The seven resource types the API serves; also used as cache tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Student, landlord and admin accounts.
    Users,
    /// Hostel listings.
    Hostels,
    /// Rooms inside a hostel.
    Rooms,
    /// Room reservations.
    Bookings,
    /// Payments settling a booking.
    Payments,
    /// Maintenance tickets raised against a room.
    Maintenance,
    /// Hostel reviews.
    Reviews,
}

impl ResourceKind {
    /// Every kind, in tag-index order.
    pub const ALL: [Self; 7] = [
        Self::Users,
        Self::Hostels,
        Self::Rooms,
        Self::Bookings,
        Self::Payments,
        Self::Maintenance,
        Self::Reviews,
    ];

    /// Dense index used by the tag registry.
    pub const fn index(self) -> usize {
        match self {
            Self::Users => 0,
            Self::Hostels => 1,
            Self::Rooms => 2,
            Self::Bookings => 3,
            Self::Payments => 4,
            Self::Maintenance => 5,
            Self::Reviews => 6,
        }
    }

    /// Singular path segment used by the API (`/booking/{id}`).
    pub const fn segment(self) -> &'static str {
        match self {
            Self::Users => "user",
            Self::Hostels => "hostel",
            Self::Rooms => "room",
            Self::Bookings => "booking",
            Self::Payments => "payment",
            Self::Maintenance => "maintenance",
            Self::Reviews => "review",
        }
    }

    /// Human label used in messages and console headings.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Hostels => "hostels",
            Self::Rooms => "rooms",
            Self::Bookings => "bookings",
            Self::Payments => "payments",
            Self::Maintenance => "maintenance tickets",
            Self::Reviews => "reviews",
        }
    }

    /// Singular noun used in notifications, e.g. `booking`.
    pub const fn noun(self) -> &'static str {
        match self {
            Self::Maintenance => "maintenance ticket",
            other => other.segment(),
        }
    }

    /// Path of the collection endpoint, e.g. `booking_all`.
    pub fn list_path(self) -> String {
        format!("{}_all", self.segment())
    }

    /// Path of the record endpoint, e.g. `booking/7`.
    pub fn item_path(self, id: EntityId) -> String {
        format!("{}/{id}", self.segment())
    }

    /// Path of the parent-scoped collection, e.g. `booking/user/3`.
    pub fn parent_path(self, parent: ParentKind, parent_id: EntityId) -> String {
        format!("{}/{}/{parent_id}", self.segment(), parent.segment())
    }

    /// Path used for deletion; users live under a dedicated route.
    pub fn delete_path(self, id: EntityId) -> String {
        match self {
            Self::Users => format!("users/delete/{id}"),
            _ => self.item_path(id),
        }
    }

    /// Display labels for the `true` / `false` states of the status flag.
    pub const fn status_labels(self) -> Option<(&'static str, &'static str)> {
        match self {
            Self::Users => Some(("verified", "unverified")),
            Self::Hostels | Self::Reviews => None,
            Self::Rooms => Some(("available", "occupied")),
            Self::Bookings => Some(("confirmed", "cancelled")),
            Self::Payments => Some(("confirmed", "pending")),
            Self::Maintenance => Some(("resolved", "pending")),
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a resource name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown resource '{0}'; expected users|hostels|rooms|bookings|payments|maintenance|reviews")]
pub struct ParseResourceKindError(String);

impl FromStr for ResourceKind {
    type Err = ParseResourceKindError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "user" | "users" => Ok(Self::Users),
            "hostel" | "hostels" => Ok(Self::Hostels),
            "room" | "rooms" => Ok(Self::Rooms),
            "booking" | "bookings" => Ok(Self::Bookings),
            "payment" | "payments" => Ok(Self::Payments),
            "maintenance" | "maintenances" => Ok(Self::Maintenance),
            "review" | "reviews" => Ok(Self::Reviews),
            _ => Err(ParseResourceKindError(value.to_owned())),
        }
    }
}

/// Parent relationships the API can scope a collection by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParentKind {
    /// Scope by owning or booking user.
    User,
    /// Scope by hostel.
    Hostel,
    /// Scope by room.
    Room,
    /// Scope by booking.
    Booking,
}

impl ParentKind {
    /// Path segment used in parent-scoped routes.
    pub const fn segment(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Hostel => "hostel",
            Self::Room => "room",
            Self::Booking => "booking",
        }
    }

    /// JSON field on child records that carries this parent's id.
    pub const fn id_field(self) -> &'static str {
        match self {
            Self::User => "userId",
            Self::Hostel => "hostelId",
            Self::Room => "roomId",
            Self::Booking => "bookingId",
        }
    }
}

impl fmt::Display for ParentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

/// Error returned when a parent kind name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown parent kind '{0}'; expected user|hostel|room|booking")]
pub struct ParseParentKindError(String);

impl FromStr for ParentKind {
    type Err = ParseParentKindError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Self::User),
            "hostel" => Ok(Self::Hostel),
            "room" => Ok(Self::Room),
            "booking" => Ok(Self::Booking),
            _ => Err(ParseParentKindError(value.to_owned())),
        }
    }
}

/// Contract shared by every entity record.
///
/// `Draft` is the partial record sent on create and update; fields left as
/// `None` are omitted from the request body.
pub trait Resource:
    Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Cache tag and route family of this resource.
    const KIND: ResourceKind;
    /// JSON field carrying the id, e.g. `bookingId`.
    const ID_FIELD: &'static str;
    /// Parent scopes the API supports for this resource.
    const PARENTS: &'static [ParentKind];

    /// Partial record used for create and update payloads.
    type Draft: Clone + fmt::Debug + Default + PartialEq + Serialize + Send + Sync + 'static;

    /// Server-assigned id.
    fn id(&self) -> EntityId;

    /// User the record belongs to, when it belongs to one.
    fn owner(&self) -> Option<EntityId> {
        None
    }

    /// Whether the API exposes the given parent scope.
    fn supports_parent(parent: ParentKind) -> bool {
        Self::PARENTS.contains(&parent)
    }
}
