//! Outbound adapters implementing the domain ports.

pub mod http;
pub mod notifier;
pub mod session_file;

pub use notifier::TracingNotifier;
pub use session_file::FileSessionStore;
