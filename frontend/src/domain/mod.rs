//! Domain primitives, client-side state and use cases.
//!
//! Purpose: model the marketplace's resources as strongly typed records and
//! hold everything the frontend derives from them: cached collections,
//! filtered views, form flows and the signed-in session. Nothing here talks
//! to the network or the filesystem directly; that happens behind
//! [`ports`].
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport-agnostic failure payload.
//! - Resource / ResourceKind: the seven resource families and their routes.
//! - SessionContext: the single holder of the current session.
//! - AuthService: the only writer of the session.

mod amount;
pub mod auth;
mod auth_service;
mod booking;
pub mod cache;
pub mod error;
pub mod forms;
mod hostel;
mod maintenance;
mod payment;
pub mod ports;
mod resource;
pub mod review;
mod room;
mod session;
mod user;
pub mod view;
mod wire;

pub use self::amount::{Amount, ParseAmountError};
pub use self::auth::{LoginCredentials, Registration, RegistrationParts, VerificationRequest};
pub use self::auth_service::AuthService;
pub use self::booking::{Booking, BookingDraft};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::hostel::{Hostel, HostelDraft, HostelStatus};
pub use self::maintenance::{Maintenance, MaintenanceDraft};
pub use self::payment::{Payment, PaymentDraft};
pub use self::resource::{
    EntityId, ParentKind, ParseParentKindError, ParseResourceKindError, Resource, ResourceKind,
};
pub use self::review::{Review, ReviewDraft};
pub use self::room::{Room, RoomDraft};
pub use self::session::{AuthenticatedUser, Capability, Session, SessionContext};
pub use self::user::{ParseUserRoleError, User, UserDraft, UserRole};

/// Convenient result alias for domain operations.
pub type DomainResult<T> = Result<T, Error>;
