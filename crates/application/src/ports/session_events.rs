//! Session lifecycle notifications

/// Receives the notification that the session is dead.
///
/// Called once per failed refresh, after both tokens have been removed.
/// Implementations return the operator to the login surface.
pub trait SessionExpiredHandler: Send + Sync {
    /// The refresh token was missing or rejected.
    fn on_session_expired(&self);
}
