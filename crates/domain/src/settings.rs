//! Client settings
//!
//! Defines how the client reaches the backend: base URL resolution and
//! timeouts.

use serde::{Deserialize, Serialize};

/// Base URL used when the client runs on a local machine.
pub const LOCAL_BASE_URL: &str = "http://localhost:8000/api";

/// Base URL of the hosted deployment.
pub const REMOTE_BASE_URL: &str = "https://ofdautocall.onrender.com/api";

const LOCAL_HOSTS: [&str; 3] = ["localhost", "127.0.0.1", ""];

/// Settings of the API client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Explicit base URL override.
    pub base_url: Option<String>,
    /// Host the client considers itself running on.
    pub client_host: String,
    /// Timeout of ordinary requests, in milliseconds.
    pub request_timeout_ms: u64,
    /// Timeout of the token refresh call, in milliseconds.
    pub refresh_timeout_ms: u64,
    /// User-Agent sent with every request.
    pub user_agent: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            client_host: "localhost".to_string(),
            request_timeout_ms: 30_000,
            refresh_timeout_ms: 10_000,
            user_agent: format!("InTransit/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ApiSettings {
    /// Creates settings pointing at an explicit base URL.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            ..Self::default()
        }
    }

    /// Resolves the base URL: explicit override, else the local default
    /// when running on a local host, else the hosted deployment.
    #[must_use]
    pub fn resolved_base_url(&self) -> String {
        if let Some(url) = self.base_url.as_deref().map(str::trim)
            && !url.is_empty()
        {
            return url.trim_end_matches('/').to_string();
        }

        if self.is_local_host() {
            LOCAL_BASE_URL.to_string()
        } else {
            REMOTE_BASE_URL.to_string()
        }
    }

    /// Returns true if `client_host` designates the local machine.
    #[must_use]
    pub fn is_local_host(&self) -> bool {
        LOCAL_HOSTS.contains(&self.client_host.trim())
    }
}
