//! Hostel marketplace frontend library.
//!
//! The crate is organised as a hexagon: `domain` holds entities, the cache
//! layer, derived views, form flows and session state; `domain::ports` holds
//! the trait seams; `outbound` implements them against the remote REST API and
//! local storage; `inbound` drives everything from the admin console.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod state;

pub use config::ClientSettings;
pub use state::FrontendState;
