//! Payments settling a booking.

use serde::{Deserialize, Serialize};

use super::amount::Amount;
use super::resource::{EntityId, ParentKind, Resource, ResourceKind};
use super::wire;

/// A payment made against a booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Server-assigned id.
    pub payment_id: EntityId,
    /// Booking being paid for.
    pub booking_id: EntityId,
    /// Paying student.
    pub user_id: EntityId,
    /// Amount paid.
    #[serde(default)]
    pub amount: Amount,
    /// Payment channel, e.g. `mpesa`.
    #[serde(default, with = "wire::text")]
    pub method: String,
    /// `true` when confirmed, `false` while pending.
    #[serde(default, with = "wire::flag")]
    pub payment_status: bool,
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

/// Partial payment record for create and update requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDraft {
    /// Booking being paid for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<EntityId>,
    /// Paying student.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<EntityId>,
    /// Amount paid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Amount>,
    /// Payment channel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Confirmation flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<bool>,
}

impl Resource for Payment {
    const KIND: ResourceKind = ResourceKind::Payments;
    const ID_FIELD: &'static str = "paymentId";
    const PARENTS: &'static [ParentKind] = &[ParentKind::Booking];

    type Draft = PaymentDraft;

    fn id(&self) -> EntityId {
        self.payment_id
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
    fn decodes_fractional_amount_into_cents() {
        let payment: Payment = serde_json::from_value(json!({
            "paymentId": 4,
            "bookingId": 7,
            "userId": 3,
            "amount": 1250.5,
            "method": "mpesa",
            "paymentStatus": false
        }))
        .expect("decode payment");

        assert_eq!(payment.amount, Amount::from_cents(125_050));
        assert!(!payment.payment_status);
        assert!(Payment::supports_parent(ParentKind::Booking));
        assert!(!Payment::supports_parent(ParentKind::Room));
    }
}
