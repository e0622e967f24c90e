//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod http_client;
mod session_events;
mod session_storage;

pub use http_client::{HttpClient, HttpClientError};
pub use session_events::SessionExpiredHandler;
pub use session_storage::{SessionStorage, SessionStorageError};
