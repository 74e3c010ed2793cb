//! Maintenance tickets raised against a room.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::resource::{EntityId, ParentKind, Resource, ResourceKind};
use super::wire;

/// A maintenance request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Maintenance {
    /// Server-assigned id.
    pub maintenance_id: EntityId,
    /// Hostel of the affected room.
    pub hostel_id: EntityId,
    /// Affected room.
    pub room_id: EntityId,
    /// Reporting student.
    pub user_id: EntityId,
    /// Short summary.
    #[serde(default, with = "wire::text")]
    pub issue_title: String,
    /// Full description.
    #[serde(default, with = "wire::text")]
    pub description: String,
    /// `true` when resolved, `false` while pending.
    #[serde(default, with = "wire::flag")]
    pub status: bool,
    /// Day the issue was reported.
    #[serde(default, rename = "date_reported", with = "wire::optional_date")]
    pub date_reported: Option<NaiveDate>,
    /// Day the issue was resolved, once it is.
    #[serde(default, rename = "date_resolved", with = "wire::optional_date")]
    pub date_resolved: Option<NaiveDate>,
    /// Student given name.
    #[serde(default, with = "wire::text")]
    pub first_name: String,
    /// Student family name.
    #[serde(default, with = "wire::text")]
    pub last_name: String,
    /// Hostel display name.
    #[serde(default, with = "wire::text")]
    pub hostel_name: String,
    /// Room number.
    #[serde(default, with = "wire::text")]
    pub room_number: String,
}

/// Partial maintenance record for create and update requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceDraft {
    /// Hostel of the affected room.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostel_id: Option<EntityId>,
    /// Affected room.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_id: Option<EntityId>,
    /// Reporting student.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<EntityId>,
    /// Short summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_title: Option<String>,
    /// Full description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Resolution flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<bool>,
}

impl Resource for Maintenance {
    const KIND: ResourceKind = ResourceKind::Maintenance;
    const ID_FIELD: &'static str = "maintenanceId";
    const PARENTS: &'static [ParentKind] = &[ParentKind::Room];

    type Draft = MaintenanceDraft;

    fn id(&self) -> EntityId {
        self.maintenance_id
    }

    fn owner(&self) -> Option<EntityId> {
        Some(self.user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn decodes_snake_case_dates() {
        let ticket: Maintenance = serde_json::from_value(json!({
            "maintenanceId": 2,
            "hostelId": 1,
            "roomId": 8,
            "userId": 3,
            "issueTitle": "Leaking tap",
            "description": "Kitchen tap drips all night",
            "status": false,
            "date_reported": "2025-02-10T08:30:00.000Z",
            "date_resolved": null
        }))
        .expect("decode ticket");

        assert_eq!(
            ticket.date_reported,
            NaiveDate::from_ymd_opt(2025, 2, 10)
        );
        assert!(ticket.date_resolved.is_none());
        assert_eq!(ticket.first_name, "");
    }
}
