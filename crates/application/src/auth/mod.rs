//! Token refresh for the authenticated transport.
//!
//! This module provides:
//! - The refresh flow exchanging a refresh token for a new access token
//! - Coalescing of concurrent refresh attempts into one backend call

mod refresh;

pub use refresh::{RefreshFailure, SessionExpired, TokenRefresher};
