//! Port for durable storage of the signed-in session.
use std::sync::{Mutex, PoisonError};

use crate::domain::Session;

use super::define_client_error;

define_client_error! {
    /// Errors raised by session storage adapters.
    pub enum SessionStoreError {
        /// The storage location could not be read or written.
        Io { message: String } => InternalError,
            "session storage unavailable: {message}",
        /// Stored data exists but cannot be decoded.
        Corrupt { message: String } => InternalError,
            "stored session is corrupt: {message}",
    }
}

/// Durable key-value storage holding at most one session.
#[cfg_attr(test, mockall::automock)]
pub trait SessionStore: Send + Sync {
    /// Read the stored session, if any.
    fn load(&self) -> Result<Option<Session>, SessionStoreError>;

    /// Replace the stored session.
    fn save(&self, session: &Session) -> Result<(), SessionStoreError>;

    /// Remove the stored session. Clearing an empty store succeeds.
    fn clear(&self) -> Result<(), SessionStoreError>;
}

/// In-memory session store for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct FixtureSessionStore {
    slot: Mutex<Option<Session>>,
}

impl FixtureSessionStore {
    /// Start with `session` already stored.
    pub fn with_session(session: Session) -> Self {
        Self {
            slot: Mutex::new(Some(session)),
        }
    }

    /// Whether a session is currently stored.
    pub fn is_populated(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl SessionStore for FixtureSessionStore {
    fn load(&self) -> Result<Option<Session>, SessionStoreError> {
        Ok(self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
