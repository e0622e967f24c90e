//! InTransit Application - Ports, session handling and use cases
//!
//! This crate defines the application layer with:
//! - Port traits (HTTP client, durable session storage, session-expired sink)
//! - The session store over durable storage
//! - The authenticated transport with single refresh-and-replay
//! - Login, logout and profile use cases

pub mod auth;
pub mod error;
pub mod ports;
pub mod session;
pub mod transport;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod test_support;

pub use auth::{RefreshFailure, SessionExpired, TokenRefresher};
pub use error::{ApplicationError, ApplicationResult, TransportError};
pub use ports::{
    HttpClient, HttpClientError, SessionExpiredHandler, SessionStorage, SessionStorageError,
};
pub use session::{InMemorySessionStorage, SessionStore};
pub use transport::{AuthenticatedTransport, BYPASS_HEADER, BYPASS_HEADER_VALUE};
pub use use_cases::{
    FetchProfile, LOGIN_FAILED_FALLBACK, Login, LoginInput, LoginOutput, Logout, LogoutOutput,
};
