//! Form state machine shared by every create, update and auth form.
//!
//! A form moves `Idle → Validating → Submitting → {Succeeded | Failed}`.
//! Validation runs on every edit for the edited field and on submit for all
//! fields; a form that fails validation returns to `Idle` with field errors
//! and never issues a request.

mod auth;
mod booking;
mod delete;
mod errors;
mod flow;
mod maintenance;
mod payment;
mod review;
pub mod rules;
mod user;

use std::fmt;

use tracing::debug;

pub use auth::{LoginField, LoginInput, RegistrationField, RegistrationInput, VerificationField, VerificationInput};
pub use booking::{BookingField, BookingUpdate, BookingUpdateInput};
pub use delete::DeleteDialog;
pub use errors::{FieldErrors, SubmitRejected};
pub use flow::{EntityForm, FormMode, MutationFlow, delete_invalidations};
pub use maintenance::{MaintenanceField, MaintenanceUpdate, MaintenanceUpdateInput};
pub use payment::{PaymentField, PaymentUpdate, PaymentUpdateInput};
pub use review::{ReviewField, ReviewInput, ReviewSubmission};
pub use user::{UserField, UserUpdate, UserUpdateInput};

/// Where a form instance is in its submit cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    /// Editable; empty or populated from the selected record.
    Idle,
    /// Running client-side validation before any request.
    Validating,
    /// Exactly one mutation in flight; submit is disabled.
    Submitting,
    /// The mutation succeeded and the form was cleared.
    Succeeded,
    /// The mutation failed; the user's input is kept.
    Failed,
}

impl fmt::Display for FormPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Submitting => "submitting",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        })
    }
}

/// One editable field of a form.
pub trait FormField: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Wire name used as the key in [`FieldErrors`].
    fn name(self) -> &'static str;
}

/// Typed input of one form.
///
/// Values are held as the text the user typed; [`FormInput::build`] parses
/// them into the typed output sent to the API.
pub trait FormInput: Clone + Default + fmt::Debug + Send + Sync {
    /// Record an update form is populated from (`()` for forms with none).
    type Record: Clone + fmt::Debug + Send + Sync;
    /// Field identifier.
    type Field: FormField;
    /// Parsed, validated payload.
    type Output: Send;

    /// Every field, in display order.
    const FIELDS: &'static [Self::Field];

    /// Input pre-populated from `record`.
    fn from_record(record: &Self::Record) -> Self;

    /// Replace the text of `field`.
    fn set(&mut self, field: Self::Field, value: &str);

    /// Current text of `field`.
    fn get(&self, field: Self::Field) -> &str;

    /// Validate one field.
    fn check(&self, field: Self::Field) -> Result<(), String>;

    /// Parse every field into the output.
    fn build(&self) -> Result<Self::Output, FieldErrors>;

    /// Validate every field.
    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        for field in Self::FIELDS {
            if let Err(message) = self.check(*field) {
                errors.insert(field.name(), message);
            }
        }
        errors
    }
}

/// A form instance: its input, the selected record, field errors, phase and
/// whether its modal is open.
#[derive(Debug, Clone)]
pub struct FormState<I: FormInput> {
    input: I,
    selected: Option<I::Record>,
    errors: FieldErrors,
    phase: FormPhase,
    open: bool,
}

impl<I: FormInput> Default for FormState<I> {
    fn default() -> Self {
        Self {
            input: I::default(),
            selected: None,
            errors: FieldErrors::new(),
            phase: FormPhase::Idle,
            open: false,
        }
    }
}

impl<I: FormInput> FormState<I> {
    /// Closed, empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the modal, populated from `selected` or empty.
    pub fn open(selected: Option<I::Record>) -> Self {
        let mut form = Self::new();
        form.open = true;
        form.select(selected);
        form
    }

    /// Switch the selected record.
    ///
    /// Every field is reset to the new record's values, or emptied when
    /// `selected` is `None`. Ignored while a submission is in flight.
    pub fn select(&mut self, selected: Option<I::Record>) -> bool {
        if self.phase == FormPhase::Submitting {
            return false;
        }
        self.input = selected.as_ref().map(I::from_record).unwrap_or_default();
        self.selected = selected;
        self.errors = FieldErrors::new();
        self.transition(FormPhase::Idle);
        true
    }

    /// Type `value` into `field`, revalidating just that field.
    pub fn edit(&mut self, field: I::Field, value: &str) -> Result<(), SubmitRejected> {
        if self.phase == FormPhase::Submitting {
            return Err(SubmitRejected::Busy);
        }
        self.input.set(field, value);
        match self.input.check(field) {
            Ok(()) => self.errors.remove(field.name()),
            Err(message) => self.errors.insert(field.name(), message),
        }
        if self.phase != FormPhase::Idle {
            self.transition(FormPhase::Idle);
        }
        Ok(())
    }

    /// Validate and, when valid, enter `Submitting`.
    ///
    /// On validation failure the form goes back to `Idle` with every field
    /// error recorded.
    pub fn begin_submit(&mut self) -> Result<I::Output, SubmitRejected> {
        if self.phase == FormPhase::Submitting {
            return Err(SubmitRejected::Busy);
        }
        self.transition(FormPhase::Validating);
        match self.input.build() {
            Ok(output) => {
                self.errors = FieldErrors::new();
                self.transition(FormPhase::Submitting);
                Ok(output)
            }
            Err(errors) => {
                self.errors = errors.clone();
                self.transition(FormPhase::Idle);
                Err(SubmitRejected::Invalid(errors))
            }
        }
    }

    /// The mutation succeeded: clear the form and close the modal.
    pub fn succeed(&mut self) {
        self.input = I::default();
        self.selected = None;
        self.errors = FieldErrors::new();
        self.open = false;
        self.transition(FormPhase::Succeeded);
    }

    /// The mutation failed: keep the input and leave the modal open.
    pub fn fail(&mut self) {
        self.transition(FormPhase::Failed);
    }

    /// Dismiss the modal without submitting. Ignored while submitting.
    pub fn close(&mut self) -> bool {
        if self.phase == FormPhase::Submitting {
            return false;
        }
        self.open = false;
        true
    }

    /// Current phase.
    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    /// Current input.
    pub fn input(&self) -> &I {
        &self.input
    }

    /// Record the form was populated from.
    pub fn selected(&self) -> Option<&I::Record> {
        self.selected.as_ref()
    }

    /// Field errors from the last edit or submit.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Whether the modal is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether the submit control must be disabled.
    pub fn submit_disabled(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    fn transition(&mut self, next: FormPhase) {
        debug!(from = %self.phase, to = %next, "form transition");
        self.phase = next;
    }
}

#[cfg(test)]
mod tests;
