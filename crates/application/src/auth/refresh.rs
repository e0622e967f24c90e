//! Refresh flow: exchange the refresh token for a new access token, or
//! declare the session dead.

use std::sync::Arc;
use std::time::Duration;

use intransit_domain::{
    ApiRequest, RefreshRequest, RefreshResponse, Session, error_message_or, token_preview,
};
use parking_lot::Mutex;
use thiserror::Error;
use tokio::sync::OnceCell;

use crate::ports::{HttpClient, SessionExpiredHandler};
use crate::session::SessionStore;
use crate::transport::decorate;

/// Why a refresh attempt could not produce a new access token.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RefreshFailure {
    /// No refresh token was stored; no call was made.
    #[error("no refresh token")]
    MissingRefreshToken,

    /// The refresh endpoint answered with a non-2xx status.
    #[error("refresh rejected with status {status}: {message}")]
    Rejected {
        /// HTTP status of the refresh response.
        status: u16,
        /// Message extracted from the response body.
        message: String,
    },

    /// The refresh call produced no response.
    #[error("refresh call failed: {0}")]
    Network(String),

    /// The refresh response carried no usable access token.
    #[error("malformed refresh response: {0}")]
    MalformedResponse(String),

    /// The refresh call did not complete in time.
    #[error("refresh timed out after {timeout_ms} ms")]
    TimedOut {
        /// The timeout that elapsed.
        timeout_ms: u64,
    },

    /// The session could not be read or written.
    #[error("session storage failed: {0}")]
    Storage(String),
}

/// Terminal outcome of a failed refresh: the session has been cleared.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("session expired: {reason}")]
pub struct SessionExpired {
    /// What went wrong.
    pub reason: RefreshFailure,
}

type RefreshOutcome = Result<String, SessionExpired>;

/// Runs the refresh flow, at most one backend call at a time.
///
/// The first caller to need a refresh starts it; callers arriving while it
/// is in flight await the same outcome. The slot is emptied once the
/// outcome is known, so a later 401 starts a fresh attempt.
pub struct TokenRefresher {
    client: Arc<dyn HttpClient>,
    session: SessionStore,
    expired: Arc<dyn SessionExpiredHandler>,
    refresh_url: String,
    timeout: Duration,
    in_flight: Mutex<Option<Arc<OnceCell<RefreshOutcome>>>>,
}

impl TokenRefresher {
    /// Creates a refresher posting to `refresh_url` (absolute).
    #[must_use]
    pub fn new(
        client: Arc<dyn HttpClient>,
        session: SessionStore,
        refresh_url: impl Into<String>,
        timeout: Duration,
        expired: Arc<dyn SessionExpiredHandler>,
    ) -> Self {
        Self {
            client,
            session,
            expired,
            refresh_url: refresh_url.into(),
            timeout,
            in_flight: Mutex::new(None),
        }
    }

    /// Obtains a new access token, joining an in-flight attempt if there is one.
    ///
    /// On success the new access token has been written to the session and
    /// is returned. On failure both tokens have been removed and the
    /// session-expired handler has been notified.
    ///
    /// # Errors
    ///
    /// Returns [`SessionExpired`] if the refresh token is missing or the
    /// exchange failed for any reason.
    pub async fn refresh(&self) -> RefreshOutcome {
        let cell = self
            .in_flight
            .lock()
            .get_or_insert_with(|| Arc::new(OnceCell::new()))
            .clone();

        let outcome = cell.get_or_init(|| self.run()).await.clone();

        let mut slot = self.in_flight.lock();
        if slot.as_ref().is_some_and(|current| Arc::ptr_eq(current, &cell)) {
            *slot = None;
        }

        outcome
    }

    async fn run(&self) -> RefreshOutcome {
        let result = match tokio::time::timeout(self.timeout, self.exchange()).await {
            Ok(result) => result,
            Err(_) => Err(RefreshFailure::TimedOut {
                timeout_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            }),
        };

        match result {
            Ok(access) => {
                tracing::info!(token = %token_preview(&access), "access token refreshed");
                Ok(access)
            }
            Err(reason) => {
                tracing::warn!(%reason, "token refresh failed, clearing session");
                self.expire().await;
                Err(SessionExpired { reason })
            }
        }
    }

    async fn exchange(&self) -> Result<String, RefreshFailure> {
        let storage = |e: crate::ports::SessionStorageError| RefreshFailure::Storage(e.to_string());

        let session = self.session.load().await.map_err(storage)?;
        if !session.can_refresh() {
            return Err(RefreshFailure::MissingRefreshToken);
        }
        let Session {
            access_token,
            refresh_token,
        } = session;

        let request = ApiRequest::post(self.refresh_url.as_str())
            .with_payload(&RefreshRequest {
                refresh: refresh_token.unwrap_or_default(),
            })
            .map_err(|e| RefreshFailure::MalformedResponse(e.to_string()))?;
        let request = decorate(&request, access_token.as_deref());

        tracing::debug!(request_id = %request.id, "requesting new access token");
        let response = self
            .client
            .execute(&request)
            .await
            .map_err(|e| RefreshFailure::Network(e.to_string()))?;

        if !response.is_success() {
            let status = response.status.as_u16();
            return Err(RefreshFailure::Rejected {
                status,
                message: error_message_or(
                    &response.body,
                    format!("Request failed with status {status}"),
                ),
            });
        }

        let body: RefreshResponse = response
            .parse()
            .map_err(|e| RefreshFailure::MalformedResponse(e.to_string()))?;
        if body.access.is_empty() {
            return Err(RefreshFailure::MalformedResponse(
                "empty access token".to_string(),
            ));
        }

        self.session
            .set_access_token(&body.access)
            .await
            .map_err(storage)?;
        Ok(body.access)
    }

    async fn expire(&self) {
        if let Err(e) = self.session.logout().await {
            tracing::warn!(error = %e, "failed to clear session after refresh failure");
        }
        self.expired.on_session_expired();
    }
}
