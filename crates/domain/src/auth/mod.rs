//! Authentication endpoints and wire payloads

mod endpoints;
mod payloads;

pub use endpoints::{LOGIN_PATH, LOGOUT_PATH, PROFILE_PATH, REFRESH_PATH, is_token_endpoint};
pub use payloads::{
    LoginRequest, LoginResponse, LogoutRequest, ProfileResponse, RefreshRequest, RefreshResponse,
    TokenPair, UserSummary,
};
