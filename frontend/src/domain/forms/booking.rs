//! Admin form for updating a booking.

use chrono::NaiveDate;

use super::flow::{EntityForm, FormMode};
use super::{FieldErrors, FormField, FormInput, rules};
use crate::domain::cache::InvalidationSet;
use crate::domain::{Amount, Booking, BookingDraft, ResourceKind};

/// Editable booking fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingField {
    /// First night of the stay.
    CheckInDate,
    /// Length of stay.
    Duration,
    /// Amount due.
    TotalAmount,
    /// Confirmed or cancelled.
    BookingStatus,
}

impl FormField for BookingField {
    fn name(self) -> &'static str {
        match self {
            Self::CheckInDate => "checkInDate",
            Self::Duration => "duration",
            Self::TotalAmount => "totalAmount",
            Self::BookingStatus => "bookingStatus",
        }
    }
}

/// Text typed into the booking update form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingUpdateInput {
    check_in_date: String,
    duration: String,
    total_amount: String,
    booking_status: String,
}

/// Parsed booking update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingUpdate {
    /// First night of the stay.
    pub check_in_date: NaiveDate,
    /// Length of stay.
    pub duration: String,
    /// Amount due.
    pub total_amount: Amount,
    /// Confirmation flag.
    pub booking_status: bool,
}

impl BookingUpdateInput {
    fn check_in_date(&self) -> Result<NaiveDate, String> {
        rules::date(&self.check_in_date, "Check-in date")
    }

    fn duration(&self) -> Result<String, String> {
        rules::required(&self.duration, "Duration")
    }

    fn total_amount(&self) -> Result<Amount, String> {
        rules::amount(&self.total_amount, "Total amount")
    }

    fn booking_status(&self) -> Result<bool, String> {
        rules::flag(
            &self.booking_status,
            "Booking status",
            ResourceKind::Bookings.status_labels(),
        )
    }
}

impl FormInput for BookingUpdateInput {
    type Record = Booking;
    type Field = BookingField;
    type Output = BookingUpdate;

    const FIELDS: &'static [BookingField] = &[
        BookingField::CheckInDate,
        BookingField::Duration,
        BookingField::TotalAmount,
        BookingField::BookingStatus,
    ];

    fn from_record(record: &Booking) -> Self {
        Self {
            check_in_date: record.check_in_date.format("%Y-%m-%d").to_string(),
            duration: record.duration.clone(),
            total_amount: record.total_amount.to_string(),
            booking_status: record.booking_status.to_string(),
        }
    }

    fn set(&mut self, field: BookingField, value: &str) {
        let slot = match field {
            BookingField::CheckInDate => &mut self.check_in_date,
            BookingField::Duration => &mut self.duration,
            BookingField::TotalAmount => &mut self.total_amount,
            BookingField::BookingStatus => &mut self.booking_status,
        };
        value.clone_into(slot);
    }

    fn get(&self, field: BookingField) -> &str {
        match field {
            BookingField::CheckInDate => &self.check_in_date,
            BookingField::Duration => &self.duration,
            BookingField::TotalAmount => &self.total_amount,
            BookingField::BookingStatus => &self.booking_status,
        }
    }

    fn check(&self, field: BookingField) -> Result<(), String> {
        match field {
            BookingField::CheckInDate => self.check_in_date().map(drop),
            BookingField::Duration => self.duration().map(drop),
            BookingField::TotalAmount => self.total_amount().map(drop),
            BookingField::BookingStatus => self.booking_status().map(drop),
        }
    }

    fn build(&self) -> Result<BookingUpdate, FieldErrors> {
        match (
            self.check_in_date(),
            self.duration(),
            self.total_amount(),
            self.booking_status(),
        ) {
            (Ok(check_in_date), Ok(duration), Ok(total_amount), Ok(booking_status)) => {
                Ok(BookingUpdate {
                    check_in_date,
                    duration,
                    total_amount,
                    booking_status,
                })
            }
            _ => Err(self.validate()),
        }
    }
}

impl EntityForm for BookingUpdateInput {
    const MODE: FormMode = FormMode::Update;

    fn draft(output: BookingUpdate, selected: Option<&Booking>) -> BookingDraft {
        BookingDraft {
            hostel_id: selected.map(|b| b.hostel_id),
            room_id: selected.map(|b| b.room_id),
            user_id: selected.map(|b| b.user_id),
            check_in_date: Some(output.check_in_date),
            duration: Some(output.duration),
            total_amount: Some(output.total_amount),
            booking_status: Some(output.booking_status),
        }
    }

    fn invalidates() -> InvalidationSet {
        InvalidationSet::of(ResourceKind::Bookings).with(ResourceKind::Payments)
    }
}
