//! Mutation flows: capability check, validation, one in-flight request,
//! cache invalidation and a notification for every outcome.

use std::sync::Arc;

use tracing::{info, warn};

use super::{DeleteDialog, FormInput, FormState, SubmitRejected};
use crate::domain::cache::{InvalidationSet, ResourceCache, TagRegistry};
use crate::domain::ports::{ApiError, EntityClient, Notification, Notifier};
use crate::domain::{Capability, EntityId, Error, Resource, ResourceKind, SessionContext};

/// Whether a form creates a new record or edits the selected one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// Submit issues a create.
    Create,
    /// Submit issues an update of the selected record.
    Update,
}

impl FormMode {
    /// Capability the session needs to submit a form of this mode.
    pub const fn capability(self, kind: ResourceKind) -> Capability {
        match self {
            Self::Create => Capability::Create(kind),
            Self::Update => Capability::Modify(kind),
        }
    }

    const fn past_tense(self) -> &'static str {
        match self {
            Self::Create => "created",
            Self::Update => "updated",
        }
    }

    const fn verb(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
        }
    }
}

/// A form that submits a create or update of one resource type.
pub trait EntityForm: FormInput<Record: Resource> {
    /// Create or update.
    const MODE: FormMode;

    /// Payload for the request, combining the parsed output with identity
    /// fields carried over from the selected record.
    fn draft(
        output: Self::Output,
        selected: Option<&Self::Record>,
    ) -> <Self::Record as Resource>::Draft;

    /// Tags invalidated when the mutation succeeds.
    fn invalidates() -> InvalidationSet {
        InvalidationSet::of(<Self::Record as Resource>::KIND)
    }
}

/// Tags invalidated by deleting a record of `kind`.
///
/// Deleting a booking removes its payments; deleting a hostel removes its
/// rooms and reviews.
pub fn delete_invalidations(kind: ResourceKind) -> InvalidationSet {
    let set = InvalidationSet::of(kind);
    match kind {
        ResourceKind::Bookings => set.with(ResourceKind::Payments),
        ResourceKind::Hostels => set
            .with(ResourceKind::Rooms)
            .with(ResourceKind::Reviews),
        _ => set,
    }
}

/// Drives create, update and delete submissions for one resource type.
pub struct MutationFlow<R: Resource> {
    client: Arc<dyn EntityClient<R>>,
    tags: Arc<TagRegistry>,
    session: Arc<SessionContext>,
    notifier: Arc<dyn Notifier>,
}

impl<R: Resource> MutationFlow<R> {
    /// Flow sharing `cache`'s client and tag registry.
    pub fn new(
        cache: &ResourceCache<R>,
        session: Arc<SessionContext>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            client: cache.client(),
            tags: cache.tags(),
            session,
            notifier,
        }
    }

    /// Submit `form`.
    ///
    /// Validation failures return without a request or a notification; the
    /// errors stay on the form. Every request outcome is notified. The
    /// returned record is `None` when the server acknowledged a create
    /// without echoing it; the invalidated tags pick it up on the next read.
    pub async fn submit<F>(&self, form: &mut FormState<F>) -> Result<Option<R>, Error>
    where
        F: EntityForm<Record = R>,
    {
        self.authorise(F::MODE.capability(R::KIND))?;

        let target = match F::MODE {
            FormMode::Create => None,
            FormMode::Update => match form.selected() {
                Some(record) => Some(record.id()),
                None => return Err(self.reject(SubmitRejected::NothingSelected)),
            },
        };

        let output = form.begin_submit()?;
        let draft = F::draft(output, form.selected());
        let result = match target {
            None => self.client.create(&draft).await,
            Some(id) => self.client.update(id, &draft).await.map(Some),
        };

        match result {
            Ok(record) => {
                self.tags.invalidate_all(&F::invalidates().with(R::KIND));
                form.succeed();
                match &record {
                    Some(stored) => {
                        info!(kind = %R::KIND, id = %stored.id(), mode = F::MODE.verb(), "mutation succeeded");
                    }
                    None => info!(kind = %R::KIND, mode = F::MODE.verb(), "mutation acknowledged"),
                }
                self.notifier.notify(Notification::success(format!(
                    "{} {} successfully",
                    capitalised(R::KIND.noun()),
                    F::MODE.past_tense()
                )));
                Ok(record)
            }
            Err(err) => {
                form.fail();
                Err(self.failed(F::MODE.verb(), err))
            }
        }
    }

    /// Delete the record targeted by `dialog`.
    ///
    /// Nothing is sent unless the dialog has a target and was confirmed.
    pub async fn delete(&self, dialog: &mut DeleteDialog<R>) -> Result<EntityId, Error> {
        self.authorise(Capability::Modify(R::KIND))?;

        let id = match dialog.begin() {
            Ok(id) => id,
            Err(rejection @ SubmitRejected::Busy) => return Err(rejection.into()),
            Err(rejection) => return Err(self.reject(rejection)),
        };

        match self.client.delete(id).await {
            Ok(()) => {
                self.tags.invalidate_all(&delete_invalidations(R::KIND));
                dialog.succeed();
                info!(kind = %R::KIND, %id, "record deleted");
                self.notifier.notify(Notification::success(format!(
                    "{} deleted successfully",
                    capitalised(R::KIND.noun())
                )));
                Ok(id)
            }
            Err(err) => {
                dialog.fail();
                Err(self.failed("delete", err))
            }
        }
    }

    fn authorise(&self, capability: Capability) -> Result<(), Error> {
        if self.session.can(capability) {
            return Ok(());
        }
        let error = Error::forbidden(format!("not permitted to {capability}"));
        warn!(%capability, "mutation refused");
        self.notifier.notify(Notification::error(error.message()));
        Err(error)
    }

    fn reject(&self, rejection: SubmitRejected) -> Error {
        self.notifier.notify(Notification::error(format!(
            "Failed to submit {}: {rejection}",
            R::KIND.noun()
        )));
        rejection.into()
    }

    fn failed(&self, verb: &str, err: ApiError) -> Error {
        warn!(kind = %R::KIND, error = %err, "mutation failed");
        self.notifier.notify(Notification::error(format!(
            "Failed to {verb} {}: {err}",
            R::KIND.noun()
        )));
        err.into()
    }
}

fn capitalised(noun: &str) -> String {
    let mut chars = noun.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
