//! Fixed-point money amounts.
//!
//! The API sends prices and totals either as JSON numbers or as numeric
//! strings (`"1500.00"`). Amounts are held as whole cents so revenue
//! aggregates never accumulate floating-point error.

use std::fmt;
use std::iter::Sum;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const CENTS_PER_UNIT: i64 = 100;
const DECIMALS: usize = 2;

/// A monetary amount in cents.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(i64);

/// Reasons a textual amount is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseAmountError {
    /// The input was blank.
    #[error("amount must not be empty")]
    Empty,
    /// The input was not a decimal number.
    #[error("amount '{0}' is not a number")]
    NotANumber(String),
    /// More than two fractional digits were supplied.
    #[error("amount '{0}' has more than two decimal places")]
    TooPrecise(String),
    /// The value does not fit the cents range.
    #[error("amount '{0}' is out of range")]
    OutOfRange(String),
}

impl Amount {
    /// Zero.
    pub const ZERO: Self = Self(0);

    /// Build an amount from whole cents.
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Build an amount from whole currency units.
    pub const fn from_units(units: i64) -> Self {
        Self(units.saturating_mul(CENTS_PER_UNIT))
    }

    /// Value in cents.
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Whether the amount is below zero.
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Add two amounts, saturating at the numeric bounds.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::saturating_add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        let units = magnitude.checked_div(CENTS_PER_UNIT.unsigned_abs()).unwrap_or(0);
        let cents = magnitude.checked_rem(CENTS_PER_UNIT.unsigned_abs()).unwrap_or(0);
        write!(f, "{sign}{units}.{cents:02}")
    }
}

impl FromStr for Amount {
    type Err = ParseAmountError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ParseAmountError::Empty);
        }
        let not_a_number = || ParseAmountError::NotANumber(raw.to_owned());
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let (whole, fraction) = match digits.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (digits, ""),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(not_a_number());
        }
        if !whole.chars().chain(fraction.chars()).all(|ch| ch.is_ascii_digit()) {
            return Err(not_a_number());
        }
        if fraction.len() > DECIMALS {
            return Err(ParseAmountError::TooPrecise(raw.to_owned()));
        }

        let out_of_range = || ParseAmountError::OutOfRange(raw.to_owned());
        let whole_units: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| out_of_range())?
        };
        let padded = format!("{fraction:0<width$}", width = DECIMALS);
        let fraction_cents: i64 = padded.parse().map_err(|_| not_a_number())?;
        let cents = whole_units
            .checked_mul(CENTS_PER_UNIT)
            .and_then(|value| value.checked_add(fraction_cents))
            .ok_or_else(out_of_range)?;
        Ok(Self(if negative { -cents } else { cents }))
    }
}

impl Serialize for Amount {
    /// Whole amounts go out as integers (`18000`). Amounts with cents go out
    /// as the number nearest their two-decimal text, which JSON writers print
    /// back as that text (`123.45`).
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % CENTS_PER_UNIT == 0 {
            return serializer.serialize_i64(self.0 / CENTS_PER_UNIT);
        }
        let value: f64 = self
            .to_string()
            .parse()
            .map_err(|err| serde::ser::Error::custom(format!("amount not representable: {err}")))?;
        serializer.serialize_f64(value)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(AmountVisitor)
    }
}

struct AmountVisitor;

impl Visitor<'_> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or numeric string")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Amount, E> {
        i64::try_from(value)
            .ok()
            .and_then(|units| units.checked_mul(CENTS_PER_UNIT))
            .map(Amount)
            .ok_or_else(|| E::custom(format!("amount {value} is out of range")))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Amount, E> {
        value
            .checked_mul(CENTS_PER_UNIT)
            .map(Amount)
            .ok_or_else(|| E::custom(format!("amount {value} is out of range")))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Amount, E> {
        if !value.is_finite() {
            return Err(E::custom("amount must be finite"));
        }
        format!("{value:.2}").parse().map_err(E::custom)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Amount, E> {
        value.parse().map_err(E::custom)
    }
}
