//! JSON bodies exchanged with the authentication endpoints.

use serde::{Deserialize, Serialize};

/// Body of `POST /auth/login/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Account name.
    pub username: String,
    /// Account password.
    pub password: String,
}

/// Access and refresh token as issued by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// New access token.
    pub access: String,
    /// New refresh token.
    pub refresh: String,
}

/// Public fields of the logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserSummary {
    /// Backend user id.
    #[serde(default)]
    pub id: Option<u64>,
    /// Account name.
    pub username: String,
    /// E-mail address, possibly empty.
    #[serde(default)]
    pub email: Option<String>,
    /// Display name.
    #[serde(default)]
    pub full_name: Option<String>,
    /// Staff flag.
    #[serde(default)]
    pub is_staff: bool,
    /// Superuser flag.
    #[serde(default)]
    pub is_superuser: bool,
}

/// Success body of `POST /auth/login/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Issued tokens.
    pub tokens: TokenPair,
    /// The authenticated user, when the backend includes it.
    #[serde(default)]
    pub user: Option<UserSummary>,
}

/// Body of `POST /auth/token/refresh/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// The stored refresh token.
    pub refresh: String,
}

/// Success body of `POST /auth/token/refresh/`.
///
/// A rotated `refresh` value may also be present; it is not read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshResponse {
    /// The new access token.
    pub access: String,
}

/// Body of `POST /auth/logout/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoutRequest {
    /// Refresh token to blacklist.
    pub refresh: String,
}

/// Success body of `GET /auth/profile/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileResponse {
    /// The authenticated user.
    pub user: UserSummary,
}
