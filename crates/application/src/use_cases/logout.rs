//! Logout use case.

use std::sync::Arc;

use intransit_domain::{ApiRequest, LOGOUT_PATH, LogoutRequest};

use crate::error::ApplicationResult;
use crate::transport::AuthenticatedTransport;

/// Output from logging out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogoutOutput {
    /// Whether the backend acknowledged the refresh token revocation.
    pub remote_revoked: bool,
}

/// Use case ending the current session.
pub struct Logout {
    transport: Arc<AuthenticatedTransport>,
}

impl Logout {
    /// Creates a new `Logout` use case.
    #[must_use]
    pub const fn new(transport: Arc<AuthenticatedTransport>) -> Self {
        Self { transport }
    }

    /// Asks the backend to revoke the refresh token, then clears the local session.
    ///
    /// The remote call is best effort: its failure is logged and the local
    /// session is cleared regardless.
    ///
    /// # Errors
    /// Returns an error only if the local session could not be cleared.
    pub async fn execute(&self) -> ApplicationResult<LogoutOutput> {
        let session = self.transport.session();
        let mut remote_revoked = false;

        if let Some(refresh) = session.refresh_token().await? {
            let request = ApiRequest::post(LOGOUT_PATH).with_payload(&LogoutRequest { refresh })?;
            match self.transport.send(&request).await {
                Ok(_) => remote_revoked = true,
                Err(e) => tracing::warn!(error = %e, "remote logout failed"),
            }
        }

        session.logout().await?;
        tracing::info!(remote_revoked, "logged out");
        Ok(LogoutOutput { remote_revoked })
    }
}
