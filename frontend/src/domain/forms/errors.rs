//! Field-level validation results and submit rejections.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::{Map, Value};

use crate::domain::Error;

/// Validation messages keyed by wire field name.
///
/// An empty map means the input is valid. Messages are meant to be shown
/// inline next to the offending field; they never reach the network.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    /// No errors.
    pub fn new() -> Self {
        Self::default()
    }

    /// A single error for `field`.
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.insert(field, message);
        errors
    }

    /// Record `message` against `field`, replacing any earlier message.
    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Forget the message for `field`.
    pub fn remove(&mut self, field: &str) {
        self.0.remove(field);
    }

    /// Message recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Whether no field has an error.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with an error.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Field/message pairs in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    /// `Ok(())` when empty, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

impl From<FieldErrors> for Error {
    fn from(errors: FieldErrors) -> Self {
        let details: Map<String, Value> = errors
            .iter()
            .map(|(field, message)| (field.to_owned(), Value::from(message)))
            .collect();
        let message = if errors.is_empty() {
            "invalid input".to_owned()
        } else {
            errors.to_string()
        };
        Error::validation(message).with_details(Value::Object(details))
    }
}

/// Reasons a form refuses to start a submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitRejected {
    /// A submission from this form is already in flight.
    #[error("a submission is already in progress")]
    Busy,
    /// Client-side validation failed; no request was sent.
    #[error("invalid input: {0}")]
    Invalid(FieldErrors),
    /// An update or delete was attempted with no record selected.
    #[error("no record selected")]
    NothingSelected,
    /// A delete was attempted without an explicit confirmation.
    #[error("deletion has not been confirmed")]
    Unconfirmed,
}

impl From<SubmitRejected> for Error {
    fn from(rejection: SubmitRejected) -> Self {
        match rejection {
            SubmitRejected::Invalid(errors) => errors.into(),
            SubmitRejected::Busy => Error::conflict(rejection.to_string()),
            SubmitRejected::NothingSelected | SubmitRejected::Unconfirmed => {
                Error::validation(rejection.to_string())
            }
        }
    }
}
