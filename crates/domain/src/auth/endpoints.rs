//! Authentication endpoint paths, relative to the API base URL.

/// Exchanges credentials for a token pair.
pub const LOGIN_PATH: &str = "/auth/login/";

/// Exchanges a refresh token for a new access token.
pub const REFRESH_PATH: &str = "/auth/token/refresh/";

/// Blacklists a refresh token.
pub const LOGOUT_PATH: &str = "/auth/logout/";

/// Returns the authenticated user.
pub const PROFILE_PATH: &str = "/auth/profile/";

/// Returns true if the target is the login or the refresh endpoint.
///
/// A 401 from either of these is never recovered by a refresh, otherwise a
/// rejected refresh token would trigger another refresh forever.
#[must_use]
pub fn is_token_endpoint(target: &str) -> bool {
    let path = target.split(['?', '#']).next().unwrap_or(target);
    path.contains(LOGIN_PATH) || path.contains(REFRESH_PATH)
}
