//! Durable session storage port

use async_trait::async_trait;

/// Errors that can occur during session storage operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionStorageError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// No location is available for durable storage.
    #[error("no storage location available")]
    Unavailable,
}

/// Key/value storage that survives restarts of the client.
#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Reads a value. Missing keys yield `None`.
    async fn get(&self, key: &str) -> Result<Option<String>, SessionStorageError>;

    /// Writes a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> Result<(), SessionStorageError>;

    /// Removes a value. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), SessionStorageError>;
}
