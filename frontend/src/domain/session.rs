//! Session state: the signed-in identity, its bearer token and what it may do.
//!
//! [`SessionContext`] is built once at start-up and handed to every adapter
//! that needs a credential. Only [`AuthService`](super::AuthService) changes
//! it, through [`SessionContext::establish`] and [`SessionContext::end`].

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use zeroize::Zeroizing;

use super::ports::{SessionStore, SessionStoreError};
use super::{EntityId, ResourceKind, UserRole};

/// Identity returned by the login and registration endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    /// Account id.
    pub user_id: EntityId,
    /// Given name.
    #[serde(default)]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
    /// Login e-mail address.
    pub email: String,
    /// Account role.
    pub role: UserRole,
}

/// A signed-in user together with the bearer token the API issued.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    user: AuthenticatedUser,
    token: Zeroizing<String>,
}

impl Session {
    /// Pair a user with their token.
    pub fn new(user: AuthenticatedUser, token: impl Into<String>) -> Self {
        Self {
            user,
            token: Zeroizing::new(token.into()),
        }
    }

    /// Signed-in user.
    pub fn user(&self) -> &AuthenticatedUser {
        &self.user
    }

    /// Bearer token.
    pub fn token(&self) -> &str {
        self.token.as_str()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user", &self.user)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Something a session may be allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Log in, register or verify an address.
    Authenticate,
    /// List or fetch any record of a resource.
    Read(ResourceKind),
    /// List records scoped to the session's own user id.
    ReadOwn(ResourceKind),
    /// Create records of a resource.
    Create(ResourceKind),
    /// Update or delete records of a resource.
    Modify(ResourceKind),
}

impl Capability {
    /// Whether `role` (or an anonymous caller when `None`) holds this
    /// capability.
    pub fn granted_to(self, role: Option<UserRole>) -> bool {
        use ResourceKind as K;
        let Some(role) = role else {
            return self == Self::Authenticate;
        };
        match (role, self) {
            (_, Self::Authenticate) | (UserRole::Admin, _) => true,
            (UserRole::Landlord, Self::Read(kind) | Self::Create(kind) | Self::Modify(kind)) => {
                matches!(kind, K::Hostels | K::Rooms)
            }
            (UserRole::Landlord, Self::ReadOwn(kind)) => {
                matches!(kind, K::Hostels | K::Rooms | K::Bookings)
            }
            (UserRole::Student, Self::Read(kind)) => {
                matches!(kind, K::Hostels | K::Rooms | K::Reviews)
            }
            (UserRole::Student, Self::ReadOwn(kind)) => matches!(
                kind,
                K::Bookings | K::Payments | K::Maintenance | K::Reviews
            ),
            (UserRole::Student, Self::Create(kind)) => {
                matches!(kind, K::Bookings | K::Reviews | K::Maintenance)
            }
            (UserRole::Student, Self::Modify(_)) => false,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authenticate => f.write_str("authenticate"),
            Self::Read(kind) => write!(f, "read {kind}"),
            Self::ReadOwn(kind) => write!(f, "read own {kind}"),
            Self::Create(kind) => write!(f, "create {kind}"),
            Self::Modify(kind) => write!(f, "modify {kind}"),
        }
    }
}

/// Process-wide session holder backed by durable storage.
pub struct SessionContext {
    current: RwLock<Option<Arc<Session>>>,
    store: Arc<dyn SessionStore>,
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("current", &self.current())
            .finish_non_exhaustive()
    }
}

impl SessionContext {
    /// Start signed out, ignoring anything in `store`.
    pub fn signed_out(store: Arc<dyn SessionStore>) -> Self {
        Self {
            current: RwLock::new(None),
            store,
        }
    }

    /// Start from whatever `store` holds.
    ///
    /// A corrupt stored session is discarded and the context starts signed
    /// out; an unreadable store is an error.
    pub fn restore(store: Arc<dyn SessionStore>) -> Result<Self, SessionStoreError> {
        let loaded = match store.load() {
            Ok(loaded) => loaded,
            Err(SessionStoreError::Corrupt { message }) => {
                warn!(%message, "discarding corrupt stored session");
                store.clear()?;
                None
            }
            Err(err) => return Err(err),
        };
        if let Some(session) = &loaded {
            debug!(user_id = %session.user().user_id, "restored stored session");
        }
        Ok(Self {
            current: RwLock::new(loaded.map(Arc::new)),
            store,
        })
    }

    /// The signed-in session, if any.
    pub fn current(&self) -> Option<Arc<Session>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Signed-in user, if any.
    pub fn user(&self) -> Option<AuthenticatedUser> {
        self.current().map(|session| session.user().clone())
    }

    /// Role of the signed-in user, if any.
    pub fn role(&self) -> Option<UserRole> {
        self.current().map(|session| session.user().role)
    }

    /// Token to attach as a bearer credential, if signed in.
    pub fn bearer_token(&self) -> Option<Zeroizing<String>> {
        self.current()
            .map(|session| Zeroizing::new(session.token().to_owned()))
    }

    /// Whether the current session holds `capability`.
    pub fn can(&self, capability: Capability) -> bool {
        capability.granted_to(self.role())
    }

    /// Whether the session may read `kind` records scoped to `user_id`.
    pub fn can_read_for_user(&self, kind: ResourceKind, user_id: EntityId) -> bool {
        self.can(Capability::Read(kind))
            || (self.can(Capability::ReadOwn(kind))
                && self.user().is_some_and(|user| user.user_id == user_id))
    }

    /// Persist `session` and make it current.
    pub(crate) fn establish(&self, session: Session) -> Result<(), SessionStoreError> {
        self.store.save(&session)?;
        debug!(user_id = %session.user().user_id, role = %session.user().role, "session established");
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(session));
        Ok(())
    }

    /// Forget the session in memory and in storage.
    ///
    /// Memory is cleared even when storage fails, so the process never keeps
    /// acting as a user who asked to log out.
    pub(crate) fn end(&self) -> Result<(), SessionStoreError> {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = None;
        debug!("session ended");
        self.store.clear()
    }
}
