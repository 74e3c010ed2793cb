//! Composition root: one cache per resource, the shared tag registry, the
//! session and the services built over them.
//!
//! Inbound adapters take this state and only depend on domain types and
//! ports, so they stay testable without network or disk access.

use std::sync::Arc;

use crate::config::{ClientSettings, SettingsError};
use crate::domain::cache::{ResourceCache, TagRegistry};
use crate::domain::forms::MutationFlow;
use crate::domain::ports::{AuthGateway, EntityClient, LandlordDirectory, Notifier, SessionStoreError};
use crate::domain::{
    AuthService, Booking, Hostel, Maintenance, Payment, Resource, Review, Room, SessionContext,
    User,
};
use crate::outbound::http::{ApiTransport, HttpAuthGateway, HttpEntityClient};
use crate::outbound::{FileSessionStore, TracingNotifier};

/// Parameter object bundling every outbound port the frontend drives.
#[derive(Clone)]
pub struct FrontendPorts {
    /// User accounts.
    pub users: Arc<dyn EntityClient<User>>,
    /// Hostel listings.
    pub hostels: Arc<dyn EntityClient<Hostel>>,
    /// Rooms.
    pub rooms: Arc<dyn EntityClient<Room>>,
    /// Bookings.
    pub bookings: Arc<dyn EntityClient<Booking>>,
    /// Payments.
    pub payments: Arc<dyn EntityClient<Payment>>,
    /// Maintenance tickets.
    pub maintenance: Arc<dyn EntityClient<Maintenance>>,
    /// Reviews.
    pub reviews: Arc<dyn EntityClient<Review>>,
    /// Landlord listing; usually the users client.
    pub landlords: Arc<dyn LandlordDirectory>,
    /// Login, registration and verification.
    pub auth: Arc<dyn AuthGateway>,
}

impl FrontendPorts {
    /// HTTP adapters sharing `transport`.
    pub fn http(transport: &ApiTransport) -> Self {
        let users = Arc::new(HttpEntityClient::<User>::new(transport.clone()));
        Self {
            users: users.clone(),
            hostels: Arc::new(HttpEntityClient::<Hostel>::new(transport.clone())),
            rooms: Arc::new(HttpEntityClient::<Room>::new(transport.clone())),
            bookings: Arc::new(HttpEntityClient::<Booking>::new(transport.clone())),
            payments: Arc::new(HttpEntityClient::<Payment>::new(transport.clone())),
            maintenance: Arc::new(HttpEntityClient::<Maintenance>::new(transport.clone())),
            reviews: Arc::new(HttpEntityClient::<Review>::new(transport.clone())),
            landlords: users,
            auth: Arc::new(HttpAuthGateway::new(transport.clone())),
        }
    }
}

/// Failures while assembling the state from configuration.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// A configuration value is invalid.
    #[error(transparent)]
    Settings(#[from] SettingsError),
    /// The stored session could not be read.
    #[error(transparent)]
    Session(#[from] SessionStoreError),
    /// The HTTP client could not be built.
    #[error("building HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Dependency bundle for the admin console.
#[derive(Clone)]
pub struct FrontendState {
    /// Current session; gates every command.
    pub session: Arc<SessionContext>,
    /// Tag generations shared by every cache.
    pub tags: Arc<TagRegistry>,
    /// Where success and error notices go.
    pub notifier: Arc<dyn Notifier>,
    /// Login, registration, verification and logout.
    pub auth: AuthService,
    /// Cached user collections.
    pub users: Arc<ResourceCache<User>>,
    /// Cached hostel collections.
    pub hostels: Arc<ResourceCache<Hostel>>,
    /// Cached room collections.
    pub rooms: Arc<ResourceCache<Room>>,
    /// Cached booking collections.
    pub bookings: Arc<ResourceCache<Booking>>,
    /// Cached payment collections.
    pub payments: Arc<ResourceCache<Payment>>,
    /// Cached maintenance collections.
    pub maintenance: Arc<ResourceCache<Maintenance>>,
    /// Cached review collections.
    pub reviews: Arc<ResourceCache<Review>>,
    /// Uncached landlord listing.
    pub landlords: Arc<dyn LandlordDirectory>,
}

impl FrontendState {
    /// Wire caches and services over `ports`.
    pub fn new(
        ports: FrontendPorts,
        session: Arc<SessionContext>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let tags = Arc::new(TagRegistry::new());
        Self {
            auth: AuthService::new(ports.auth, Arc::clone(&session), Arc::clone(&notifier)),
            users: cached(ports.users, &tags),
            hostels: cached(ports.hostels, &tags),
            rooms: cached(ports.rooms, &tags),
            bookings: cached(ports.bookings, &tags),
            payments: cached(ports.payments, &tags),
            maintenance: cached(ports.maintenance, &tags),
            reviews: cached(ports.reviews, &tags),
            landlords: ports.landlords,
            session,
            tags,
            notifier,
        }
    }

    /// Build the production state: file-backed session, HTTP adapters and
    /// the tracing notifier.
    ///
    /// # Errors
    ///
    /// Fails when a setting is invalid, the session directory cannot be read
    /// or the HTTP client cannot be built.
    pub fn connect(settings: &ClientSettings) -> Result<Self, StartupError> {
        let base = settings.api_base_url()?;
        let store = Arc::new(FileSessionStore::new(settings.session_dir()?));
        let session = Arc::new(SessionContext::restore(store)?);
        let transport = ApiTransport::new(base, settings.user_agent(), Arc::clone(&session))?;
        Ok(Self::new(
            FrontendPorts::http(&transport),
            session,
            Arc::new(TracingNotifier),
        ))
    }

    /// Mutation flow for the resource cached in `cache`.
    pub fn flow<R: Resource>(&self, cache: &ResourceCache<R>) -> MutationFlow<R> {
        MutationFlow::new(cache, Arc::clone(&self.session), Arc::clone(&self.notifier))
    }
}

fn cached<R: Resource>(
    client: Arc<dyn EntityClient<R>>,
    tags: &Arc<TagRegistry>,
) -> Arc<ResourceCache<R>> {
    Arc::new(ResourceCache::new(client, Arc::clone(tags)))
}
