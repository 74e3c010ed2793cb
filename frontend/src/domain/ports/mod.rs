//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_client_error;

mod auth_gateway;
mod entity_client;
mod notifier;
mod session_store;

#[cfg(test)]
pub use auth_gateway::MockAuthGateway;
pub use auth_gateway::{AuthGateway, FIXTURE_VERIFICATION_CODE, FixtureAuthGateway};
#[cfg(test)]
pub use entity_client::{MockEntityClient, MockLandlordDirectory};
pub use entity_client::{
    ApiError, CallCounts, EntityClient, FixtureEntityClient, LandlordDirectory,
};
#[cfg(test)]
pub use notifier::MockNotifier;
pub use notifier::{Notification, NotificationKind, Notifier, RecordingNotifier};
#[cfg(test)]
pub use session_store::MockSessionStore;
pub use session_store::{FixtureSessionStore, SessionStore, SessionStoreError};
