//! Hostel listings.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::resource::{EntityId, ParentKind, Resource, ResourceKind};
use super::wire;

/// Moderation state of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostelStatus {
    /// Awaiting admin approval.
    Pending,
    /// Visible to students.
    Approved,
    /// Rejected by an admin.
    Rejected,
    /// Any state this client does not know about yet.
    #[serde(other)]
    Unknown,
}

impl fmt::Display for HostelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Unknown => "unknown",
        })
    }
}

/// A hostel owned by a landlord.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hostel {
    /// Server-assigned id.
    pub hostel_id: EntityId,
    /// Account that created the listing.
    #[serde(default)]
    pub user_id: Option<EntityId>,
    /// Landlord account owning the listing.
    #[serde(default)]
    pub landlord_id: Option<EntityId>,
    /// Display name.
    #[serde(default, with = "wire::text")]
    pub hostel_name: String,
    /// Free-text location.
    #[serde(default, with = "wire::text")]
    pub location: String,
    /// Contact phone number.
    #[serde(default, rename = "contact_number", with = "wire::text")]
    pub contact: String,
    /// Listing description.
    #[serde(default, with = "wire::text")]
    pub description: String,
    /// Cover image URL.
    #[serde(default, rename = "image_URL")]
    pub image_url: Option<String>,
    /// Moderation state, when the API reports one.
    #[serde(default)]
    pub status: Option<HostelStatus>,
    /// Landlord given name, joined in by the API.
    #[serde(default, with = "wire::text")]
    pub first_name: String,
    /// Landlord family name, joined in by the API.
    #[serde(default, with = "wire::text")]
    pub last_name: String,
}

impl Hostel {
    /// Landlord responsible for the listing, falling back to its creator.
    pub fn landlord(&self) -> Option<EntityId> {
        self.landlord_id.or(self.user_id)
    }
}

/// Partial hostel record for create and update requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HostelDraft {
    /// Landlord account owning the listing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landlord_id: Option<EntityId>,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostel_name: Option<String>,
    /// Free-text location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Contact phone number.
    #[serde(rename = "contact_number", skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    /// Listing description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Moderation state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<HostelStatus>,
}

impl Resource for Hostel {
    const KIND: ResourceKind = ResourceKind::Hostels;
    const ID_FIELD: &'static str = "hostelId";
    const PARENTS: &'static [ParentKind] = &[ParentKind::User];

    type Draft = HostelDraft;

    fn id(&self) -> EntityId {
        self.hostel_id
    }

    fn owner(&self) -> Option<EntityId> {
        self.landlord_id.or(self.user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn decodes_listing_with_unknown_status() {
        let hostel: Hostel = serde_json::from_value(json!({
            "hostelId": 5,
            "userId": 9,
            "landlordId": 2,
            "hostelName": "Kilimani Heights",
            "location": "Nairobi",
            "contact_number": "0712345678",
            "status": "suspended"
        }))
        .expect("decode hostel");

        assert_eq!(hostel.landlord(), Some(EntityId::new(2)));
        assert_eq!(hostel.contact, "0712345678");
        assert_eq!(hostel.status, Some(HostelStatus::Unknown));
    }

    #[rstest]
    fn landlord_falls_back_to_creator() {
        let hostel: Hostel =
            serde_json::from_value(json!({ "hostelId": 1, "userId": 4 })).expect("decode hostel");
        assert_eq!(hostel.landlord(), Some(EntityId::new(4)));
    }
}
