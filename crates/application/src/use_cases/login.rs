//! Login use case.

use std::sync::Arc;

use intransit_domain::{
    ApiRequest, LOGIN_PATH, LoginRequest, LoginResponse, UserSummary, error_message_or,
};

use crate::error::{ApplicationError, ApplicationResult, TransportError};
use crate::transport::AuthenticatedTransport;

/// Message shown when the backend rejects credentials without saying why.
pub const LOGIN_FAILED_FALLBACK: &str = "Invalid username or password";

/// Input for logging in.
#[derive(Debug, Clone)]
pub struct LoginInput {
    /// Account name.
    pub username: String,
    /// Account password.
    pub password: String,
}

/// Output from logging in.
#[derive(Debug, Clone)]
pub struct LoginOutput {
    /// The authenticated user, when the backend reports it.
    pub user: Option<UserSummary>,
}

/// Use case exchanging credentials for a session.
pub struct Login {
    transport: Arc<AuthenticatedTransport>,
}

impl Login {
    /// Creates a new `Login` use case.
    #[must_use]
    pub const fn new(transport: Arc<AuthenticatedTransport>) -> Self {
        Self { transport }
    }

    /// Posts the credentials and stores both issued tokens.
    ///
    /// A 401 from the login endpoint is never answered with a token refresh.
    ///
    /// # Errors
    /// - `InvalidInput` if username or password is blank (nothing is sent)
    /// - `LoginFailed` with the backend's message if the credentials are refused
    /// - `Transport` if the backend could not be reached
    pub async fn execute(&self, input: LoginInput) -> ApplicationResult<LoginOutput> {
        if input.username.trim().is_empty() || input.password.is_empty() {
            return Err(ApplicationError::InvalidInput(
                "Username and password are required".to_string(),
            ));
        }

        let request = ApiRequest::post(LOGIN_PATH).with_payload(&LoginRequest {
            username: input.username.trim().to_string(),
            password: input.password,
        })?;

        let response = match self.transport.send(&request).await {
            Ok(response) => response,
            Err(
                TransportError::Unauthorized { response, .. } | TransportError::Status { response, .. },
            ) if response.status.is_client_error() => {
                return Err(ApplicationError::LoginFailed(error_message_or(
                    &response.body,
                    LOGIN_FAILED_FALLBACK,
                )));
            }
            Err(e) => return Err(e.into()),
        };

        let body: LoginResponse = response.parse()?;
        self.transport.session().save_tokens(&body.tokens).await?;

        tracing::info!(
            username = body.user.as_ref().map_or("", |u| u.username.as_str()),
            "logged in"
        );
        Ok(LoginOutput { user: body.user })
    }
}
