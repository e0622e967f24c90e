//! Application error types

use intransit_domain::{ApiResponse, DomainError, StatusCode, error_message_or};
use thiserror::Error;

use crate::auth::SessionExpired;
use crate::ports::{HttpClientError, SessionStorageError};

/// Failures surfaced by the authenticated transport.
///
/// Only [`TransportError::Unauthorized`] responses that were eligible for
/// recovery went through the refresh path; every other variant is handed
/// back exactly as it happened.
#[derive(Debug, Error)]
pub enum TransportError {
    /// An authenticated action was attempted without an access token.
    #[error("not authenticated")]
    Unauthenticated,

    /// A 401 that was not recovered by a refresh.
    #[error("unauthorized: {message}")]
    Unauthorized {
        /// The 401 response.
        response: Box<ApiResponse>,
        /// Message extracted from the response body.
        message: String,
    },

    /// A 401 triggered a refresh which failed; the session has been cleared.
    #[error("{expired}")]
    SessionExpired {
        /// The original 401 response.
        response: Box<ApiResponse>,
        /// Why the refresh failed.
        #[source]
        expired: SessionExpired,
    },

    /// Any other non-2xx response.
    #[error("request failed with status {}: {message}", .response.status)]
    Status {
        /// The failed response.
        response: Box<ApiResponse>,
        /// Message extracted from the response body.
        message: String,
    },

    /// The request never produced a response.
    #[error(transparent)]
    Network(#[from] HttpClientError),

    /// The session could not be read or written.
    #[error(transparent)]
    Storage(#[from] SessionStorageError),

    /// The request could not be built.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl TransportError {
    /// Builds the error for a non-2xx response that is handed back to the caller.
    #[must_use]
    pub fn from_response(response: ApiResponse) -> Self {
        let message = error_message_or(
            &response.body,
            format!("Request failed with status {}", response.status.as_u16()),
        );
        let response = Box::new(response);
        if response.status.is_unauthorized() {
            Self::Unauthorized { response, message }
        } else {
            Self::Status { response, message }
        }
    }

    /// Returns the HTTP status, if a response was received.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        self.response().map(|r| r.status)
    }

    /// Returns the response that caused the failure, if any.
    #[must_use]
    pub fn response(&self) -> Option<&ApiResponse> {
        match self {
            Self::Unauthorized { response, .. }
            | Self::SessionExpired { response, .. }
            | Self::Status { response, .. } => Some(response),
            _ => None,
        }
    }

    /// Returns true if the caller must return to the login surface.
    #[must_use]
    pub const fn requires_login(&self) -> bool {
        matches!(self, Self::Unauthenticated | Self::SessionExpired { .. })
    }

    /// Returns a message suitable for display to the operator.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Unauthorized { message, .. } | Self::Status { message, .. } => message.clone(),
            Self::Unauthenticated => "Please log in to continue".to_string(),
            Self::SessionExpired { .. } => "Session expired, please log in again".to_string(),
            other => other.to_string(),
        }
    }
}

/// Application-level errors returned by use cases.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// The transport failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The session could not be read or written.
    #[error(transparent)]
    Storage(#[from] SessionStorageError),

    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// The input was rejected before any request was made.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The backend refused the credentials.
    #[error("{0}")]
    LoginFailed(String),
}

impl ApplicationError {
    /// Returns a message suitable for display to the operator.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Transport(e) => e.message(),
            Self::LoginFailed(message) | Self::InvalidInput(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
