//! In-memory session storage.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::ports::{SessionStorage, SessionStorageError};

/// Thread-safe in-memory key/value storage.
///
/// Contents are lost when the process exits.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStorage {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemorySessionStorage {
    /// Creates a storage pre-filled with the given entries.
    #[must_use]
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let values = entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self {
            values: Arc::new(RwLock::new(values)),
        }
    }
}

#[async_trait]
impl SessionStorage for InMemorySessionStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, SessionStorageError> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), SessionStorageError> {
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), SessionStorageError> {
        self.values.write().await.remove(key);
        Ok(())
    }
}
