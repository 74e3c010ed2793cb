//! Marketplace REST API adapters.
//!
//! A thin reqwest implementation of the `EntityClient`, `LandlordDirectory`
//! and `AuthGateway` ports sharing one [`ApiTransport`].

mod auth_gateway;
mod dto;
mod entity_client;
mod envelope;
mod transport;

pub use auth_gateway::HttpAuthGateway;
pub use entity_client::HttpEntityClient;
pub use transport::{ApiTransport, DEFAULT_USER_AGENT};
