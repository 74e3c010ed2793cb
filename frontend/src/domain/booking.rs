//! Room bookings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::amount::Amount;
use super::resource::{EntityId, ParentKind, Resource, ResourceKind};
use super::wire;

/// A student's reservation of a room.
///
/// The API joins the student's names and the hostel and room labels onto each
/// booking so list screens can search them without extra requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Server-assigned id.
    pub booking_id: EntityId,
    /// Hostel of the booked room.
    pub hostel_id: EntityId,
    /// Booked room.
    pub room_id: EntityId,
    /// Student who booked.
    pub user_id: EntityId,
    /// First night of the stay.
    #[serde(with = "wire::date")]
    pub check_in_date: NaiveDate,
    /// Length of stay as entered by the student, e.g. `3 months`.
    #[serde(default, with = "wire::text")]
    pub duration: String,
    /// Amount due for the whole stay.
    #[serde(default)]
    pub total_amount: Amount,
    /// `true` when confirmed, `false` when cancelled.
    #[serde(default, with = "wire::flag")]
    pub booking_status: bool,
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

/// Partial booking record for create and update requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    /// Hostel of the booked room.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostel_id: Option<EntityId>,
    /// Booked room.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_id: Option<EntityId>,
    /// Student who booked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<EntityId>,
    /// First night of the stay.
    #[serde(skip_serializing_if = "Option::is_none", with = "wire::optional_date")]
    pub check_in_date: Option<NaiveDate>,
    /// Length of stay.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    /// Amount due.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<Amount>,
    /// Confirmation flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_status: Option<bool>,
}

impl Resource for Booking {
    const KIND: ResourceKind = ResourceKind::Bookings;
    const ID_FIELD: &'static str = "bookingId";
    const PARENTS: &'static [ParentKind] = &[ParentKind::User, ParentKind::Room];

    type Draft = BookingDraft;

    fn id(&self) -> EntityId {
        self.booking_id
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
    fn decodes_joined_booking_row() {
        let booking: Booking = serde_json::from_value(json!({
            "bookingId": 7,
            "hostelId": 1,
            "roomId": 2,
            "userId": 3,
            "firstName": "Brian",
            "lastName": null,
            "hostelName": "Kilimani Heights",
            "roomNumber": "B2",
            "checkInDate": "2025-09-01T00:00:00.000Z",
            "duration": "4 months",
            "totalAmount": "18000",
            "bookingStatus": true,
            "createdAt": "2025-08-20T10:00:00.000Z"
        }))
        .expect("decode booking");

        assert_eq!(booking.id(), EntityId::new(7));
        assert_eq!(booking.last_name, "");
        assert_eq!(booking.total_amount, Amount::from_units(18_000));
        assert_eq!(
            booking.check_in_date,
            NaiveDate::from_ymd_opt(2025, 9, 1).expect("date")
        );
    }

    #[rstest]
    #[case(json!(null), false)]
    #[case(json!(1), true)]
    #[case(json!(0), false)]
    fn status_tolerates_null_and_integers(#[case] status: serde_json::Value, #[case] expected: bool) {
        let booking: Booking = serde_json::from_value(json!({
            "bookingId": 8,
            "hostelId": 1,
            "roomId": 2,
            "userId": 3,
            "checkInDate": "2025-09-01",
            "bookingStatus": status
        }))
        .expect("decode booking");
        assert_eq!(booking.booking_status, expected);
    }

    #[rstest]
    fn draft_omits_unset_fields() {
        let draft = BookingDraft {
            duration: Some("2 months".to_owned()),
            booking_status: Some(false),
            ..BookingDraft::default()
        };
        assert_eq!(
            serde_json::to_value(&draft).expect("encode draft"),
            json!({ "duration": "2 months", "bookingStatus": false })
        );
    }
}
