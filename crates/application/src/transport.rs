//! Authenticated transport
//!
//! Decorates every outbound request with the session's bearer token and
//! the hosting provider's bypass header, and recovers from a 401 with one
//! refresh-and-replay cycle per original request.

use std::sync::Arc;
use std::time::Duration;

use intransit_domain::{
    ApiRequest, ApiResponse, ApiSettings, REFRESH_PATH, is_token_endpoint, token_preview,
};

use crate::auth::TokenRefresher;
use crate::error::TransportError;
use crate::ports::{HttpClient, SessionExpiredHandler};
use crate::session::SessionStore;

/// Header that skips the tunnelling provider's interstitial page.
pub const BYPASS_HEADER: &str = "ngrok-skip-browser-warning";

/// Constant value of [`BYPASS_HEADER`].
pub const BYPASS_HEADER_VALUE: &str = "true";

/// Returns a copy of `request` carrying the bypass header and, when a
/// non-empty token is given, `Authorization: Bearer <token>`.
pub(crate) fn decorate(request: &ApiRequest, access_token: Option<&str>) -> ApiRequest {
    let mut decorated = request.clone();
    match access_token.filter(|t| !t.is_empty()) {
        Some(token) => decorated.headers.set("Authorization", format!("Bearer {token}")),
        None => decorated.headers.remove("Authorization"),
    }
    decorated.headers.set(BYPASS_HEADER, BYPASS_HEADER_VALUE);
    decorated
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attempt {
    Initial,
    Replay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Disposition {
    Deliver,
    Fail,
    Refresh,
}

fn disposition(response: &ApiResponse, target: &str, attempt: Attempt) -> Disposition {
    if response.is_success() {
        return Disposition::Deliver;
    }
    if !response.status.is_unauthorized() || is_token_endpoint(target) {
        return Disposition::Fail;
    }
    match attempt {
        Attempt::Initial => Disposition::Refresh,
        Attempt::Replay => Disposition::Fail,
    }
}

/// HTTP transport bound to one session.
pub struct AuthenticatedTransport {
    client: Arc<dyn HttpClient>,
    session: SessionStore,
    refresher: TokenRefresher,
    base_url: String,
}

impl AuthenticatedTransport {
    /// Creates a transport for the base URL resolved from `settings`.
    #[must_use]
    pub fn new(
        client: Arc<dyn HttpClient>,
        session: SessionStore,
        settings: &ApiSettings,
        expired: Arc<dyn SessionExpiredHandler>,
    ) -> Self {
        let base_url = settings.resolved_base_url();
        let refresher = TokenRefresher::new(
            client.clone(),
            session.clone(),
            ApiRequest::post(REFRESH_PATH).resolve_url(&base_url),
            Duration::from_millis(settings.refresh_timeout_ms),
            expired,
        );
        Self {
            client,
            session,
            refresher,
            base_url,
        }
    }

    /// Returns the session this transport reads tokens from.
    #[must_use]
    pub const fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Returns the resolved base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends a request, refreshing the access token once on 401.
    ///
    /// # Errors
    ///
    /// - [`TransportError::SessionExpired`] if a 401 triggered a refresh that failed
    /// - [`TransportError::Unauthorized`] for a 401 that is not recoverable
    /// - [`TransportError::Status`] for any other non-2xx response
    /// - [`TransportError::Network`] if no response was received
    /// - [`TransportError::Domain`] if the resolved target is not a valid URL; nothing is sent
    pub async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        let mut resolved = request.clone();
        resolved.url = request.resolve_url(&self.base_url);
        resolved.parse_url()?;

        let token = self.session.access_token().await?;
        let response = self
            .dispatch(&resolved, token.as_deref(), Attempt::Initial)
            .await?;

        match disposition(&response, &resolved.url, Attempt::Initial) {
            Disposition::Deliver => Ok(response),
            Disposition::Fail => Err(TransportError::from_response(response)),
            Disposition::Refresh => self.refresh_and_replay(&resolved, response).await,
        }
    }

    /// Sends a request that requires a logged-in session.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Unauthenticated`] without sending anything
    /// if no access token is stored, otherwise as [`Self::send`].
    pub async fn send_authenticated(
        &self,
        request: &ApiRequest,
    ) -> Result<ApiResponse, TransportError> {
        if !self.session.is_authenticated().await? {
            return Err(TransportError::Unauthenticated);
        }
        self.send(request).await
    }

    async fn refresh_and_replay(
        &self,
        request: &ApiRequest,
        unauthorized: ApiResponse,
    ) -> Result<ApiResponse, TransportError> {
        let access = match self.refresher.refresh().await {
            Ok(access) => access,
            Err(expired) => {
                return Err(TransportError::SessionExpired {
                    response: Box::new(unauthorized),
                    expired,
                });
            }
        };

        let response = self
            .dispatch(request, Some(&access), Attempt::Replay)
            .await?;

        match disposition(&response, &request.url, Attempt::Replay) {
            Disposition::Deliver => Ok(response),
            Disposition::Fail | Disposition::Refresh => {
                Err(TransportError::from_response(response))
            }
        }
    }

    async fn dispatch(
        &self,
        request: &ApiRequest,
        access_token: Option<&str>,
        attempt: Attempt,
    ) -> Result<ApiResponse, TransportError> {
        let outbound = decorate(request, access_token);
        tracing::debug!(
            request_id = %outbound.id,
            method = %outbound.method,
            url = %outbound.url,
            token = %access_token.map(token_preview).unwrap_or_default(),
            ?attempt,
            "sending request"
        );

        Ok(self.client.execute(&outbound).await?)
    }
}
