//! Fetch profile use case.

use std::sync::Arc;

use intransit_domain::{ApiRequest, PROFILE_PATH, ProfileResponse, UserSummary};

use crate::error::ApplicationResult;
use crate::transport::AuthenticatedTransport;

/// Use case loading the profile of the logged-in user.
pub struct FetchProfile {
    transport: Arc<AuthenticatedTransport>,
}

impl FetchProfile {
    /// Creates a new `FetchProfile` use case.
    #[must_use]
    pub const fn new(transport: Arc<AuthenticatedTransport>) -> Self {
        Self { transport }
    }

    /// Returns the current user.
    ///
    /// # Errors
    /// - `Transport(Unauthenticated)` if no access token is stored
    /// - `Transport(SessionExpired)` if the session could not be refreshed
    pub async fn execute(&self) -> ApplicationResult<UserSummary> {
        let response = self
            .transport
            .send_authenticated(&ApiRequest::get(PROFILE_PATH))
            .await?;
        let body: ProfileResponse = response.parse()?;
        Ok(body.user)
    }
}
