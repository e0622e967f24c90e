//! Session domain type
//!
//! The session is the only persisted state of the client core: an access
//! token attached to every request and a refresh token used solely to mint
//! a new access token.

use serde::{Deserialize, Serialize};

/// Storage key of the access token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Storage key of the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Snapshot of the two bearer credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Short-lived credential sent with each request.
    pub access_token: Option<String>,
    /// Longer-lived credential used to obtain a new access token.
    pub refresh_token: Option<String>,
}

impl Session {
    /// Creates a session holding both tokens.
    #[must_use]
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: Some(access_token.into()),
            refresh_token: Some(refresh_token.into()),
        }
    }

    /// Presence check only: an expired but present token still counts.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.access_token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Returns true if a refresh can be attempted.
    #[must_use]
    pub fn can_refresh(&self) -> bool {
        self.refresh_token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Returns true if neither token is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.refresh_token.is_none()
    }
}

/// Returns a preview of a token (first 8 chars + ...) safe for logs.
#[must_use]
pub fn token_preview(token: &str) -> String {
    match token.char_indices().nth(8) {
        Some((idx, _)) if token.len() > 12 => format!("{}...", &token[..idx]),
        _ => "***".to_string(),
    }
}
