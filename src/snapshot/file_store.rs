//! File-based snapshot storage.
//!
//! Each key is stored as its own file in the configured directory,
//! mirroring the fixed-key browser-storage layout.

use std::path::PathBuf;

use async_trait::async_trait;

use super::{
    decode, encode, CachedSnapshot, SnapshotStore, ACADEMIC_LEVEL_KEY, TIMESTAMP_KEY,
    USER_DATA_KEY,
};
use crate::SessionError;

/// File-based snapshot storage.
///
/// # Example
///
/// ```rust,ignore
/// use vestibule::snapshot::FileSnapshotStore;
///
/// let store = FileSnapshotStore::new("/var/lib/myapp/session")?;
/// ```
#[derive(Clone)]
pub struct FileSnapshotStore {
    directory: PathBuf,
}

impl FileSnapshotStore {
    /// Creates a new file snapshot store.
    ///
    /// Creates the directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(directory: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let dir = directory.into();
        std::fs::create_dir_all(&dir).map_err(|e| {
            SessionError::Store(format!("Failed to create snapshot directory: {e}"))
        })?;
        Ok(Self { directory: dir })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.directory.join(key)
    }

    fn read_key(&self, key: &str) -> Result<Option<String>, SessionError> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }

        std::fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| SessionError::Store(format!("Failed to read {key}: {e}")))
    }

    fn write_key(&self, key: &str, value: &str) -> Result<(), SessionError> {
        std::fs::write(self.key_path(key), value)
            .map_err(|e| SessionError::Store(format!("Failed to write {key}: {e}")))
    }

    fn remove_key(&self, key: &str) -> Result<(), SessionError> {
        let path = self.key_path(key);
        if path.exists() {
            std::fs::remove_file(&path)
                .map_err(|e| SessionError::Store(format!("Failed to remove {key}: {e}")))?;
        }
        Ok(())
    }
}

#[async_trait]
impl SnapshotStore for FileSnapshotStore {
    async fn load(&self) -> Result<Option<CachedSnapshot>, SessionError> {
        let Some(user_data) = self.read_key(USER_DATA_KEY)? else {
            return Ok(None);
        };
        let Some(timestamp) = self.read_key(TIMESTAMP_KEY)? else {
            return Ok(None);
        };

        Ok(decode(&user_data, &timestamp))
    }

    async fn save(&self, snapshot: &CachedSnapshot) -> Result<(), SessionError> {
        let (user_data, timestamp) = encode(snapshot)?;

        self.write_key(USER_DATA_KEY, &user_data)?;
        self.write_key(TIMESTAMP_KEY, &timestamp)?;
        self.write_key(ACADEMIC_LEVEL_KEY, &snapshot.stats.academic_level)?;

        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        self.remove_key(USER_DATA_KEY)?;
        self.remove_key(TIMESTAMP_KEY)?;
        self.remove_key(ACADEMIC_LEVEL_KEY)?;
        Ok(())
    }

    async fn academic_level(&self) -> Result<Option<String>, SessionError> {
        self.read_key(ACADEMIC_LEVEL_KEY)
    }
}
