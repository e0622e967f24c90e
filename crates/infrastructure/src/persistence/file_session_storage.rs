//! File-backed session storage.
//!
//! Tokens are kept in the platform-specific data directory:
//! - Linux: ~/.local/share/intransit/session.json
//! - macOS: ~/Library/Application Support/intransit/session.json
//! - Windows: %APPDATA%/intransit/session.json

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use intransit_application::ports::{SessionStorage, SessionStorageError};
use tokio::fs;
use tokio::sync::Mutex;

use crate::serialization::{from_json_bytes, to_json_pretty_bytes};

type Entries = BTreeMap<String, String>;

/// Session storage persisted as a flat JSON object.
///
/// Every operation rereads the file, so values written by another process
/// are picked up on the next read. Writes go through a temporary file and a
/// rename; on unix the file is readable by its owner only.
#[derive(Debug)]
pub struct FileSessionStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileSessionStorage {
    /// Creates storage backed by the given file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Creates storage at the default location in the user's data directory.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStorageError::Unavailable`] if the platform has no
    /// data directory.
    pub fn in_data_dir() -> Result<Self, SessionStorageError> {
        Self::default_path()
            .map(Self::new)
            .ok_or(SessionStorageError::Unavailable)
    }

    /// Returns the default session file path, if the platform has a data directory.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|p| p.join("intransit").join("session.json"))
    }

    /// Returns the path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_entries(&self) -> Result<Entries, SessionStorageError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(e.into()),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Entries::new());
        }
        from_json_bytes(&bytes).map_err(|e| SessionStorageError::Serialization(e.to_string()))
    }

    async fn write_entries(&self, entries: &Entries) -> Result<(), SessionStorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let bytes = to_json_pretty_bytes(entries)
            .map_err(|e| SessionStorageError::Serialization(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        restrict_to_owner(&tmp).await?;
        fs::write(&tmp, bytes).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

/// Creates `path` if needed and makes it readable by the owner only, before
/// any token is written to it.
#[cfg(unix)]
async fn restrict_to_owner(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
        .await?;
    fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).await
}

#[cfg(not(unix))]
async fn restrict_to_owner(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

#[async_trait]
impl SessionStorage for FileSessionStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, SessionStorageError> {
        Ok(self.read_entries().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), SessionStorageError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.read_entries().await?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries).await
    }

    async fn remove(&self, key: &str) -> Result<(), SessionStorageError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.read_entries().await?;
        if entries.remove(key).is_none() {
            return Ok(());
        }
        if entries.is_empty() {
            return match fs::remove_file(&self.path).await {
                Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
                _ => Ok(()),
            };
        }
        self.write_entries(&entries).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn storage(dir: &TempDir) -> FileSessionStorage {
        FileSessionStorage::new(dir.path().join("nested").join("session.json"))
    }

    #[tokio::test]
    async fn missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let storage = storage(&dir);

        assert_eq!(storage.get("access_token").await.unwrap(), None);
    }

    #[tokio::test]
    async fn values_survive_a_new_instance() {
        let dir = TempDir::new().unwrap();
        storage(&dir).set("access_token", "a1").await.unwrap();
        storage(&dir).set("refresh_token", "r1").await.unwrap();

        let reopened = storage(&dir);
        assert_eq!(
            reopened.get("access_token").await.unwrap().as_deref(),
            Some("a1")
        );
        assert_eq!(
            reopened.get("refresh_token").await.unwrap().as_deref(),
            Some("r1")
        );
    }

    #[tokio::test]
    async fn removing_last_key_deletes_file() {
        let dir = TempDir::new().unwrap();
        let storage = storage(&dir);
        storage.set("access_token", "a1").await.unwrap();
        storage.set("refresh_token", "r1").await.unwrap();

        storage.remove("access_token").await.unwrap();
        assert!(storage.path().exists());
        storage.remove("refresh_token").await.unwrap();
        assert!(!storage.path().exists());

        storage.remove("refresh_token").await.unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn session_file_is_private_to_owner() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let storage = storage(&dir);
        storage.set("access_token", "a1").await.unwrap();
        storage.set("refresh_token", "r1").await.unwrap();

        let mode = fs::metadata(storage.path()).await.unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[tokio::test]
    async fn corrupt_file_is_a_serialization_error() {
        let dir = TempDir::new().unwrap();
        let storage = storage(&dir);
        fs::create_dir_all(storage.path().parent().unwrap())
            .await
            .unwrap();
        fs::write(storage.path(), b"not json").await.unwrap();

        let err = storage.get("access_token").await.unwrap_err();
        assert!(matches!(err, SessionStorageError::Serialization(_)));
    }
}
