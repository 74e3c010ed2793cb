//! Port for typed CRUD access to one resource family of the remote API.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::domain::{EntityId, ParentKind, Resource, User, UserRole};

use super::define_client_error;

define_client_error! {
    /// Failures reported by entity and auth clients.
    ///
    /// None of these are retried automatically; callers surface them to the
    /// user, who re-triggers the action.
    pub enum ApiError {
        /// The server rejected the payload shape or values.
        Validation { message: String } => Validation,
            "request rejected: {message}",
        /// The credential is missing, expired or insufficient.
        Unauthorized { message: String } => Unauthorized,
            "not authorised: {message}",
        /// The referenced record no longer exists.
        NotFound { message: String } => NotFound,
            "not found: {message}",
        /// The record changed server-side and the mutation no longer applies.
        Conflict { message: String } => Conflict,
            "conflict: {message}",
        /// The request never completed or the server failed.
        Network { message: String } => Network,
            "network failure: {message}",
        /// The response body could not be decoded.
        Decode { message: String } => InternalError,
            "unexpected response: {message}",
    }
}

/// Typed request/response wrapper for one resource type.
///
/// Implementations attach the current session credential to every call when
/// one is present and omit it otherwise.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntityClient<R: Resource>: Send + Sync {
    /// Fetch the whole collection.
    async fn list(&self) -> Result<Vec<R>, ApiError>;

    /// Fetch one record.
    async fn get_by_id(&self, id: EntityId) -> Result<R, ApiError>;

    /// Fetch the records belonging to one parent.
    async fn get_by_parent(
        &self,
        parent: ParentKind,
        parent_id: EntityId,
    ) -> Result<Vec<R>, ApiError>;

    /// Create a record from a partial draft.
    ///
    /// Returns the stored record when the server echoes it back, and `None`
    /// when it only acknowledges the create (e.g. `{"message": ...}`).
    async fn create(&self, draft: &R::Draft) -> Result<Option<R>, ApiError>;

    /// Apply a partial update to an existing record.
    async fn update(&self, id: EntityId, draft: &R::Draft) -> Result<R, ApiError>;

    /// Remove a record.
    async fn delete(&self, id: EntityId) -> Result<(), ApiError>;
}

/// Port for the landlord directory, a filtered user listing served separately.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LandlordDirectory: Send + Sync {
    /// Fetch every landlord account.
    async fn list_landlords(&self) -> Result<Vec<User>, ApiError>;
}

/// Number of calls a [`FixtureEntityClient`] has served, per operation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CallCounts {
    /// `list` calls.
    pub list: usize,
    /// `get_by_id` calls.
    pub get_by_id: usize,
    /// `get_by_parent` calls.
    pub get_by_parent: usize,
    /// `create` calls.
    pub create: usize,
    /// `update` calls.
    pub update: usize,
    /// `delete` calls.
    pub delete: usize,
}

#[derive(Debug, Default)]
struct Counters {
    list: AtomicUsize,
    get_by_id: AtomicUsize,
    get_by_parent: AtomicUsize,
    create: AtomicUsize,
    update: AtomicUsize,
    delete: AtomicUsize,
}

fn bump(counter: &AtomicUsize) {
    counter.fetch_add(1, Ordering::SeqCst);
}

/// In-memory entity client that behaves like a well-formed server.
///
/// Records are stored in insertion order. Created records receive the next
/// free id; drafts are merged field-by-field into existing records on update.
/// A single failure can be queued with [`FixtureEntityClient::fail_next`].
#[derive(Debug)]
pub struct FixtureEntityClient<R: Resource> {
    records: Mutex<Vec<R>>,
    next_id: Mutex<u64>,
    pending_failure: Mutex<Option<ApiError>>,
    acknowledge_only: AtomicBool,
    counters: Counters,
}

impl<R: Resource> Default for FixtureEntityClient<R> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<R: Resource> FixtureEntityClient<R> {
    /// Seed the fixture with existing records.
    pub fn new(records: Vec<R>) -> Self {
        let highest = records.iter().map(|r| r.id().get()).max().unwrap_or(0);
        Self {
            records: Mutex::new(records),
            next_id: Mutex::new(highest.saturating_add(1)),
            pending_failure: Mutex::new(None),
            acknowledge_only: AtomicBool::new(false),
            counters: Counters::default(),
        }
    }

    /// Make the next call fail with `error`.
    pub fn fail_next(&self, error: ApiError) {
        *self
            .pending_failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(error);
    }

    /// Answer creates with an acknowledgement instead of the stored record.
    #[must_use]
    pub fn acknowledging_creates(self) -> Self {
        self.acknowledge_only.store(true, Ordering::SeqCst);
        self
    }

    /// Snapshot of the stored records.
    pub fn records(&self) -> Vec<R> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Calls served so far.
    pub fn calls(&self) -> CallCounts {
        let c = &self.counters;
        CallCounts {
            list: c.list.load(Ordering::SeqCst),
            get_by_id: c.get_by_id.load(Ordering::SeqCst),
            get_by_parent: c.get_by_parent.load(Ordering::SeqCst),
            create: c.create.load(Ordering::SeqCst),
            update: c.update.load(Ordering::SeqCst),
            delete: c.delete.load(Ordering::SeqCst),
        }
    }

    /// Total mutations (create, update, delete) served.
    pub fn mutation_calls(&self) -> usize {
        let calls = self.calls();
        calls.create + calls.update + calls.delete
    }

    fn take_failure(&self) -> Result<(), ApiError> {
        match self
            .pending_failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn allocate_id(&self) -> EntityId {
        let mut next = self.next_id.lock().unwrap_or_else(PoisonError::into_inner);
        let id = EntityId::new(*next);
        *next = next.saturating_add(1);
        id
    }
}

fn missing(kind: &str, id: EntityId) -> ApiError {
    ApiError::not_found(format!("{kind} {id} does not exist"))
}

fn to_object<T: serde::Serialize>(value: &T) -> Result<Map<String, Value>, ApiError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(ApiError::validation(format!(
            "expected a JSON object, got {other}"
        ))),
        Err(err) => Err(ApiError::validation(err.to_string())),
    }
}

fn merge<R: Resource>(
    mut base: Map<String, Value>,
    draft: &R::Draft,
    id: EntityId,
) -> Result<R, ApiError> {
    base.extend(to_object(draft)?);
    base.insert(R::ID_FIELD.to_owned(), Value::from(id.get()));
    serde_json::from_value(Value::Object(base)).map_err(|err| ApiError::validation(err.to_string()))
}

#[async_trait]
impl<R: Resource> EntityClient<R> for FixtureEntityClient<R> {
    async fn list(&self) -> Result<Vec<R>, ApiError> {
        bump(&self.counters.list);
        self.take_failure()?;
        Ok(self.records())
    }

    async fn get_by_id(&self, id: EntityId) -> Result<R, ApiError> {
        bump(&self.counters.get_by_id);
        self.take_failure()?;
        self.records()
            .into_iter()
            .find(|record| record.id() == id)
            .ok_or_else(|| missing(R::KIND.segment(), id))
    }

    async fn get_by_parent(
        &self,
        parent: ParentKind,
        parent_id: EntityId,
    ) -> Result<Vec<R>, ApiError> {
        bump(&self.counters.get_by_parent);
        self.take_failure()?;
        if !R::supports_parent(parent) {
            return Err(ApiError::not_found(format!(
                "{} cannot be listed by {parent}",
                R::KIND
            )));
        }
        let expected = Value::from(parent_id.get());
        let mut matching = Vec::new();
        for record in self.records() {
            if to_object(&record)?.get(parent.id_field()) == Some(&expected) {
                matching.push(record);
            }
        }
        Ok(matching)
    }

    async fn create(&self, draft: &R::Draft) -> Result<Option<R>, ApiError> {
        bump(&self.counters.create);
        self.take_failure()?;
        let id = self.allocate_id();
        let record = merge::<R>(Map::new(), draft, id)?;
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
        if self.acknowledge_only.load(Ordering::SeqCst) {
            return Ok(None);
        }
        Ok(Some(record))
    }

    async fn update(&self, id: EntityId, draft: &R::Draft) -> Result<R, ApiError> {
        bump(&self.counters.update);
        self.take_failure()?;
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        let slot = records
            .iter_mut()
            .find(|record| record.id() == id)
            .ok_or_else(|| missing(R::KIND.segment(), id))?;
        let updated = merge::<R>(to_object(&*slot)?, draft, id)?;
        *slot = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, id: EntityId) -> Result<(), ApiError> {
        bump(&self.counters.delete);
        self.take_failure()?;
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        let before = records.len();
        records.retain(|record| record.id() != id);
        if records.len() == before {
            return Err(missing(R::KIND.segment(), id));
        }
        Ok(())
    }
}

#[async_trait]
impl LandlordDirectory for FixtureEntityClient<User> {
    async fn list_landlords(&self) -> Result<Vec<User>, ApiError> {
        self.take_failure()?;
        Ok(self
            .records()
            .into_iter()
            .filter(|user| user.role == UserRole::Landlord)
            .collect())
    }
}
