//! Admin form for updating a payment.

use super::flow::{EntityForm, FormMode};
use super::{FieldErrors, FormField, FormInput, rules};
use crate::domain::cache::InvalidationSet;
use crate::domain::{Amount, Payment, PaymentDraft, ResourceKind};

/// Editable payment fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentField {
    /// Amount paid.
    Amount,
    /// Payment channel.
    Method,
    /// Confirmed or pending.
    PaymentStatus,
}

impl FormField for PaymentField {
    fn name(self) -> &'static str {
        match self {
            Self::Amount => "amount",
            Self::Method => "method",
            Self::PaymentStatus => "paymentStatus",
        }
    }
}

/// Text typed into the payment update form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentUpdateInput {
    amount: String,
    method: String,
    payment_status: String,
}

/// Parsed payment update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentUpdate {
    /// Amount paid.
    pub amount: Amount,
    /// Payment channel.
    pub method: String,
    /// Confirmation flag.
    pub payment_status: bool,
}

impl PaymentUpdateInput {
    fn amount(&self) -> Result<Amount, String> {
        rules::amount(&self.amount, "Amount")
    }

    fn method(&self) -> Result<String, String> {
        rules::required(&self.method, "Payment method")
    }

    fn payment_status(&self) -> Result<bool, String> {
        rules::flag(
            &self.payment_status,
            "Payment status",
            ResourceKind::Payments.status_labels(),
        )
    }
}

impl FormInput for PaymentUpdateInput {
    type Record = Payment;
    type Field = PaymentField;
    type Output = PaymentUpdate;

    const FIELDS: &'static [PaymentField] = &[
        PaymentField::Amount,
        PaymentField::Method,
        PaymentField::PaymentStatus,
    ];

    fn from_record(record: &Payment) -> Self {
        Self {
            amount: record.amount.to_string(),
            method: record.method.clone(),
            payment_status: record.payment_status.to_string(),
        }
    }

    fn set(&mut self, field: PaymentField, value: &str) {
        let slot = match field {
            PaymentField::Amount => &mut self.amount,
            PaymentField::Method => &mut self.method,
            PaymentField::PaymentStatus => &mut self.payment_status,
        };
        value.clone_into(slot);
    }

    fn get(&self, field: PaymentField) -> &str {
        match field {
            PaymentField::Amount => &self.amount,
            PaymentField::Method => &self.method,
            PaymentField::PaymentStatus => &self.payment_status,
        }
    }

    fn check(&self, field: PaymentField) -> Result<(), String> {
        match field {
            PaymentField::Amount => self.amount().map(drop),
            PaymentField::Method => self.method().map(drop),
            PaymentField::PaymentStatus => self.payment_status().map(drop),
        }
    }

    fn build(&self) -> Result<PaymentUpdate, FieldErrors> {
        match (self.amount(), self.method(), self.payment_status()) {
            (Ok(amount), Ok(method), Ok(payment_status)) => Ok(PaymentUpdate {
                amount,
                method,
                payment_status,
            }),
            _ => Err(self.validate()),
        }
    }
}

impl EntityForm for PaymentUpdateInput {
    const MODE: FormMode = FormMode::Update;

    fn draft(output: PaymentUpdate, selected: Option<&Payment>) -> PaymentDraft {
        PaymentDraft {
            booking_id: selected.map(|p| p.booking_id),
            user_id: selected.map(|p| p.user_id),
            amount: Some(output.amount),
            method: Some(output.method),
            payment_status: Some(output.payment_status),
        }
    }

    fn invalidates() -> InvalidationSet {
        InvalidationSet::of(ResourceKind::Payments).with(ResourceKind::Bookings)
    }
}
