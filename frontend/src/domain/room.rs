//! Rooms belonging to a hostel.

use serde::{Deserialize, Serialize};

use super::amount::Amount;
use super::resource::{EntityId, ParentKind, Resource, ResourceKind};
use super::wire;

/// A bookable room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Server-assigned id.
    pub room_id: EntityId,
    /// Hostel the room belongs to.
    pub hostel_id: EntityId,
    /// Room number as printed on the door.
    #[serde(default, with = "wire::text")]
    pub room_number: String,
    /// Room category, e.g. `single` or `shared`.
    #[serde(default, with = "wire::text")]
    pub room_type: String,
    /// Price per booking period.
    #[serde(default)]
    pub price: Amount,
    /// Number of occupants the room holds.
    #[serde(default, with = "wire::count")]
    pub capacity: u32,
    /// Free-text description.
    #[serde(default, with = "wire::text")]
    pub description: String,
    /// `true` while the room is available.
    #[serde(default, with = "wire::flag")]
    pub status: bool,
}

/// Partial room record for create and update requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDraft {
    /// Hostel the room belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostel_id: Option<EntityId>,
    /// Room number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_number: Option<String>,
    /// Room category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_type: Option<String>,
    /// Price per booking period.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Amount>,
    /// Number of occupants.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    /// Free-text description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Availability flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<bool>,
}

impl Resource for Room {
    const KIND: ResourceKind = ResourceKind::Rooms;
    const ID_FIELD: &'static str = "roomId";
    const PARENTS: &'static [ParentKind] = &[ParentKind::Hostel];

    type Draft = RoomDraft;

    fn id(&self) -> EntityId {
        self.room_id
    }
}
