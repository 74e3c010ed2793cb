//! Search fields, status partitions and tallies for each list screen.

use super::ViewRecord;
use crate::domain::{Amount, Booking, Hostel, Maintenance, Payment, Review, Room, User, UserRole};

impl ViewRecord for User {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.first_name.as_str(), self.last_name.as_str(), self.email.as_str()]
    }

    fn status_flag(&self) -> Option<bool> {
        Some(self.verified)
    }

    fn role(&self) -> Option<UserRole> {
        Some(self.role)
    }
}

impl ViewRecord for Hostel {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.hostel_name.as_str()]
    }
}

impl ViewRecord for Room {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.room_number.as_str(), self.room_type.as_str()]
    }

    fn status_flag(&self) -> Option<bool> {
        Some(self.status)
    }
}

impl ViewRecord for Booking {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.first_name.as_str(),
            self.last_name.as_str(),
            self.hostel_name.as_str(),
            self.room_number.as_str(),
        ]
    }

    fn status_flag(&self) -> Option<bool> {
        Some(self.booking_status)
    }

    fn tallied_amount(&self) -> Option<Amount> {
        Some(self.total_amount)
    }
}

impl ViewRecord for Payment {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.first_name.as_str(),
            self.last_name.as_str(),
            self.hostel_name.as_str(),
            self.room_number.as_str(),
        ]
    }

    fn status_flag(&self) -> Option<bool> {
        Some(self.payment_status)
    }

    fn tallied_amount(&self) -> Option<Amount> {
        Some(self.amount)
    }
}

impl ViewRecord for Maintenance {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.issue_title.as_str(),
            self.first_name.as_str(),
            self.last_name.as_str(),
            self.hostel_name.as_str(),
            self.room_number.as_str(),
        ]
    }

    fn status_flag(&self) -> Option<bool> {
        Some(self.status)
    }
}

impl ViewRecord for Review {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.comment.as_str(), self.hostel_name.as_str()]
    }

    fn rating(&self) -> Option<u32> {
        Some(self.rating)
    }
}
