//! Confirmation dialog guarding record deletion.

use std::fmt;
use std::marker::PhantomData;

use tracing::debug;

use super::{FormPhase, SubmitRejected};
use crate::domain::{EntityId, Resource};

/// Delete confirmation for one record of `R`.
///
/// Deletion has no input to validate, so the dialog goes straight from
/// `Idle` to `Submitting` once confirmed.
pub struct DeleteDialog<R: Resource> {
    target: Option<EntityId>,
    confirmed: bool,
    phase: FormPhase,
    open: bool,
    _kind: PhantomData<fn() -> R>,
}

impl<R: Resource> fmt::Debug for DeleteDialog<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeleteDialog")
            .field("kind", &R::KIND)
            .field("target", &self.target)
            .field("confirmed", &self.confirmed)
            .field("phase", &self.phase)
            .field("open", &self.open)
            .finish()
    }
}

impl<R: Resource> Default for DeleteDialog<R> {
    fn default() -> Self {
        Self {
            target: None,
            confirmed: false,
            phase: FormPhase::Idle,
            open: false,
            _kind: PhantomData,
        }
    }
}

impl<R: Resource> DeleteDialog<R> {
    /// Open the dialog for `id`, unconfirmed.
    pub fn open(id: EntityId) -> Self {
        Self {
            target: Some(id),
            open: true,
            ..Self::default()
        }
    }

    /// The user confirmed the deletion.
    pub fn confirm(&mut self) {
        self.confirmed = true;
    }

    /// Dismiss the dialog. Ignored while the delete is in flight.
    pub fn cancel(&mut self) -> bool {
        if self.phase == FormPhase::Submitting {
            return false;
        }
        self.target = None;
        self.confirmed = false;
        self.open = false;
        self.transition(FormPhase::Idle);
        true
    }

    /// Enter `Submitting` and return the target id.
    pub fn begin(&mut self) -> Result<EntityId, SubmitRejected> {
        if self.phase == FormPhase::Submitting {
            return Err(SubmitRejected::Busy);
        }
        let id = self.target.ok_or(SubmitRejected::NothingSelected)?;
        if !self.confirmed {
            return Err(SubmitRejected::Unconfirmed);
        }
        self.transition(FormPhase::Submitting);
        Ok(id)
    }

    /// The delete succeeded: close the dialog.
    pub fn succeed(&mut self) {
        self.target = None;
        self.confirmed = false;
        self.open = false;
        self.transition(FormPhase::Succeeded);
    }

    /// The delete failed: keep the target, require a fresh confirmation.
    pub fn fail(&mut self) {
        self.confirmed = false;
        self.transition(FormPhase::Failed);
    }

    /// Record the dialog targets.
    pub fn target(&self) -> Option<EntityId> {
        self.target
    }

    /// Whether the user has confirmed.
    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    /// Current phase.
    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    /// Whether the dialog is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    fn transition(&mut self, next: FormPhase) {
        debug!(kind = %R::KIND, from = %self.phase, to = %next, "delete dialog transition");
        self.phase = next;
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::Booking;

    #[test]
    fn unconfirmed_dialog_refuses_to_begin() {
        let mut dialog = DeleteDialog::<Booking>::open(EntityId::new(3));
        assert_eq!(dialog.begin(), Err(SubmitRejected::Unconfirmed));
        assert_eq!(dialog.phase(), FormPhase::Idle);
    }

    #[test]
    fn dialog_without_target_reports_nothing_selected() {
        let mut dialog = DeleteDialog::<Booking>::default();
        dialog.confirm();
        assert_eq!(dialog.begin(), Err(SubmitRejected::NothingSelected));
    }

    #[test]
    fn confirmed_dialog_is_busy_until_resolved() {
        let mut dialog = DeleteDialog::<Booking>::open(EntityId::new(3));
        dialog.confirm();
        assert_eq!(dialog.begin(), Ok(EntityId::new(3)));
        assert_eq!(dialog.begin(), Err(SubmitRejected::Busy));
        assert!(!dialog.cancel());

        dialog.fail();
        assert_eq!(dialog.phase(), FormPhase::Failed);
        assert_eq!(dialog.target(), Some(EntityId::new(3)));
        assert!(!dialog.is_confirmed());
    }

    #[test]
    fn success_closes_dialog() {
        let mut dialog = DeleteDialog::<Booking>::open(EntityId::new(3));
        dialog.confirm();
        dialog.begin().expect("confirmed dialog begins");
        dialog.succeed();
        assert!(!dialog.is_open());
        assert_eq!(dialog.target(), None);
        assert_eq!(dialog.phase(), FormPhase::Succeeded);
    }
}
