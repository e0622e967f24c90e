//! Session store over durable storage.

use std::sync::Arc;

use intransit_domain::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, Session, TokenPair};

use crate::ports::{SessionStorage, SessionStorageError};

/// Process-wide handle on the persisted session.
///
/// Cloning is cheap; every clone reads and writes the same storage. The
/// store is created once at startup and passed to the transport and use
/// cases explicitly.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Creates a store over the given storage.
    #[must_use]
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self { storage }
    }

    /// Reads a raw value.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be read.
    pub async fn get(&self, key: &str) -> Result<Option<String>, SessionStorageError> {
        self.storage.get(key).await
    }

    /// Writes a raw value.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be written.
    pub async fn set(&self, key: &str, value: &str) -> Result<(), SessionStorageError> {
        self.storage.set(key, value).await
    }

    /// Removes a raw value.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be written.
    pub async fn remove(&self, key: &str) -> Result<(), SessionStorageError> {
        self.storage.remove(key).await
    }

    /// Returns the access token; an empty value counts as absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be read.
    pub async fn access_token(&self) -> Result<Option<String>, SessionStorageError> {
        Ok(self.get(ACCESS_TOKEN_KEY).await?.filter(|t| !t.is_empty()))
    }

    /// Returns the refresh token; an empty value counts as absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be read.
    pub async fn refresh_token(&self) -> Result<Option<String>, SessionStorageError> {
        Ok(self.get(REFRESH_TOKEN_KEY).await?.filter(|t| !t.is_empty()))
    }

    /// Reads both tokens.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be read.
    pub async fn load(&self) -> Result<Session, SessionStorageError> {
        Ok(Session {
            access_token: self.access_token().await?,
            refresh_token: self.refresh_token().await?,
        })
    }

    /// Presence check of the access token. Expiry is not validated; an
    /// expired token reports authenticated until a request fails with 401.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be read.
    pub async fn is_authenticated(&self) -> Result<bool, SessionStorageError> {
        Ok(self.load().await?.is_authenticated())
    }

    /// Writes both tokens after a successful login.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be written.
    pub async fn save_tokens(&self, tokens: &TokenPair) -> Result<(), SessionStorageError> {
        self.set(ACCESS_TOKEN_KEY, &tokens.access).await?;
        self.set(REFRESH_TOKEN_KEY, &tokens.refresh).await
    }

    /// Replaces the access token, leaving the refresh token untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be written.
    pub async fn set_access_token(&self, access: &str) -> Result<(), SessionStorageError> {
        self.set(ACCESS_TOKEN_KEY, access).await
    }

    /// Removes both tokens.
    ///
    /// Both removals are attempted even if the first one fails; the first
    /// error is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be written.
    pub async fn logout(&self) -> Result<(), SessionStorageError> {
        let access = self.remove(ACCESS_TOKEN_KEY).await;
        let refresh = self.remove(REFRESH_TOKEN_KEY).await;
        access.and(refresh)
    }
}
