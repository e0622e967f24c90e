//! InTransit Domain - Core client types
//!
//! This crate defines the domain model for the InTransit order-tracking
//! client: the persisted session, the request and response records that
//! flow through the authenticated transport, and the wire payloads of the
//! authentication endpoints. All types here are pure Rust with no I/O.

pub mod auth;
pub mod error;
pub mod error_body;
pub mod request;
pub mod response;
pub mod session;
pub mod settings;

pub use auth::{
    LOGIN_PATH, LOGOUT_PATH, LoginRequest, LoginResponse, LogoutRequest, PROFILE_PATH,
    ProfileResponse, REFRESH_PATH, RefreshRequest, RefreshResponse, TokenPair, UserSummary,
    is_token_endpoint,
};
pub use error::{DomainError, DomainResult};
pub use error_body::{error_message, error_message_or};
pub use request::{ApiRequest, Header, Headers, HttpMethod};
pub use response::{ApiResponse, StatusCode};
pub use session::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, Session, token_preview};
pub use settings::{ApiSettings, LOCAL_BASE_URL, REMOTE_BASE_URL};
