//! Plain-text tables and summary lines for console output.

use std::fmt::Write as _;

use crate::domain::view::{Aggregates, Projection, ViewRecord};
use crate::domain::{
    Booking, Hostel, Maintenance, Payment, ResourceKind, Review, Room, User, UserRole,
};

const COLUMN_GAP: &str = "  ";

/// A record that renders as one table row.
pub trait Tabular {
    /// Column headings, in display order.
    const HEADERS: &'static [&'static str];

    /// Cell text for each heading.
    fn cells(&self) -> Vec<String>;
}

fn status_text(kind: ResourceKind, flag: bool) -> String {
    match kind.status_labels() {
        Some((yes, no)) => if flag { yes } else { no }.to_owned(),
        None => flag.to_string(),
    }
}

fn optional(value: Option<&str>) -> String {
    value.unwrap_or("-").to_owned()
}

impl Tabular for User {
    const HEADERS: &'static [&'static str] = &["ID", "NAME", "EMAIL", "PHONE", "ROLE", "STATUS"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.user_id.to_string(),
            format!("{} {}", self.first_name, self.last_name),
            self.email.clone(),
            optional(self.phone_number.as_deref()),
            self.role.to_string(),
            status_text(ResourceKind::Users, self.verified),
        ]
    }
}

impl Tabular for Hostel {
    const HEADERS: &'static [&'static str] = &["ID", "NAME", "LOCATION", "CONTACT", "LANDLORD", "STATUS"];

    fn cells(&self) -> Vec<String> {
        let landlord = format!("{} {}", self.first_name, self.last_name);
        vec![
            self.hostel_id.to_string(),
            self.hostel_name.clone(),
            self.location.clone(),
            self.contact.clone(),
            if landlord.trim().is_empty() { "-".to_owned() } else { landlord.trim().to_owned() },
            self.status.map_or_else(|| "-".to_owned(), |status| status.to_string()),
        ]
    }
}

impl Tabular for Room {
    const HEADERS: &'static [&'static str] = &["ID", "HOSTEL", "NUMBER", "TYPE", "PRICE", "CAPACITY", "STATUS"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.room_id.to_string(),
            self.hostel_id.to_string(),
            self.room_number.clone(),
            self.room_type.clone(),
            self.price.to_string(),
            self.capacity.to_string(),
            status_text(ResourceKind::Rooms, self.status),
        ]
    }
}

impl Tabular for Booking {
    const HEADERS: &'static [&'static str] = &[
        "ID", "STUDENT", "HOSTEL", "ROOM", "CHECK-IN", "DURATION", "TOTAL", "STATUS",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.booking_id.to_string(),
            format!("{} {}", self.first_name, self.last_name),
            self.hostel_name.clone(),
            self.room_number.clone(),
            self.check_in_date.format("%Y-%m-%d").to_string(),
            self.duration.clone(),
            self.total_amount.to_string(),
            status_text(ResourceKind::Bookings, self.booking_status),
        ]
    }
}

impl Tabular for Payment {
    const HEADERS: &'static [&'static str] = &[
        "ID", "BOOKING", "STUDENT", "HOSTEL", "ROOM", "AMOUNT", "METHOD", "STATUS",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.payment_id.to_string(),
            self.booking_id.to_string(),
            format!("{} {}", self.first_name, self.last_name),
            self.hostel_name.clone(),
            self.room_number.clone(),
            self.amount.to_string(),
            self.method.clone(),
            status_text(ResourceKind::Payments, self.payment_status),
        ]
    }
}

impl Tabular for Maintenance {
    const HEADERS: &'static [&'static str] = &[
        "ID", "ISSUE", "STUDENT", "HOSTEL", "ROOM", "REPORTED", "STATUS",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.maintenance_id.to_string(),
            self.issue_title.clone(),
            format!("{} {}", self.first_name, self.last_name),
            self.hostel_name.clone(),
            self.room_number.clone(),
            self.date_reported
                .map_or_else(|| "-".to_owned(), |date| date.format("%Y-%m-%d").to_string()),
            status_text(ResourceKind::Maintenance, self.status),
        ]
    }
}

impl Tabular for Review {
    const HEADERS: &'static [&'static str] = &["ID", "HOSTEL", "USER", "RATING", "COMMENT", "CREATED"];

    fn cells(&self) -> Vec<String> {
        let hostel = if self.hostel_name.is_empty() {
            self.hostel_id.to_string()
        } else {
            self.hostel_name.clone()
        };
        vec![
            self.review_id.to_string(),
            hostel,
            self.user_id.to_string(),
            self.rating.to_string(),
            self.comment.clone(),
            self.created_at
                .map_or_else(|| "-".to_owned(), |at| at.format("%Y-%m-%d").to_string()),
        ]
    }
}

/// Render `rows` under `T::HEADERS` with left-aligned, padded columns.
pub fn table<'a, T: Tabular + 'a>(rows: impl IntoIterator<Item = &'a T>) -> String {
    let body: Vec<Vec<String>> = rows.into_iter().map(Tabular::cells).collect();
    let mut widths: Vec<usize> = T::HEADERS.iter().map(|header| header.chars().count()).collect();
    for row in &body {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let headers: Vec<String> = T::HEADERS.iter().map(|header| (*header).to_owned()).collect();
    push_row(&mut out, &headers, &widths);
    for row in &body {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Dashboard line for `kind`, e.g.
/// `total 3 | confirmed 2 | cancelled 1 | revenue 1500.00`.
pub fn summary(kind: ResourceKind, aggregates: &Aggregates) -> String {
    let mut line = format!("total {}", aggregates.total);
    if kind == ResourceKind::Users {
        for role in UserRole::ALL {
            let _ = write!(line, " | {role} {}", aggregates.role_count(role));
        }
        return line;
    }
    if let Some((yes, no)) = kind.status_labels() {
        let _ = write!(line, " | {yes} {} | {no} {}", aggregates.positive, aggregates.negative);
    }
    match kind {
        ResourceKind::Bookings => {
            let _ = write!(line, " | revenue {}", aggregates.amount);
        }
        ResourceKind::Payments => {
            let _ = write!(line, " | collected {}", aggregates.amount);
        }
        ResourceKind::Reviews => {
            let _ = write!(line, " | mean rating {}", aggregates.rating);
        }
        _ => {}
    }
    line
}

/// Table of the projected rows followed by the summary line.
pub fn projection<R: ViewRecord + Tabular>(projection: &Projection<'_, R>) -> String {
    let mut out = table(projection.rows.iter().copied());
    out.push_str(&summary(R::KIND, &projection.aggregates));
    out.push('\n');
    out
}

/// Aligned `key: value` lines for a single record.
pub fn record<T: Tabular>(record: &T) -> String {
    let width = T::HEADERS
        .iter()
        .map(|header| header.chars().count())
        .max()
        .unwrap_or(0);
    T::HEADERS
        .iter()
        .zip(record.cells())
        .fold(String::new(), |mut out, (header, cell)| {
            let _ = writeln!(out, "{header:<width$}  {cell}");
            out
        })
}
