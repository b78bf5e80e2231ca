//! In-memory snapshot storage.
//!
//! Suitable for tests and single-run processes. Values are stored as
//! the same serialized strings the file store persists, so corrupt
//! data behaves identically across backends.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use super::{
    decode, encode, CachedSnapshot, SnapshotStore, ACADEMIC_LEVEL_KEY, TIMESTAMP_KEY,
    USER_DATA_KEY,
};
use crate::SessionError;

/// In-memory snapshot storage.
///
/// Contents are lost when the process exits. For persistent storage,
/// use [`FileSnapshotStore`](super::FileSnapshotStore).
#[derive(Clone)]
pub struct InMemorySnapshotStore {
    keys: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self {
            keys: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Sets a raw key value, bypassing serialization.
    ///
    /// Lets tests plant stale timestamps or corrupt payloads.
    pub fn set_raw(&self, key: &str, value: impl Into<String>) -> Result<(), SessionError> {
        self.keys
            .write()
            .map_err(|_| SessionError::Store("Lock poisoned".to_owned()))?
            .insert(key.to_owned(), value.into());
        Ok(())
    }

    /// Reads a raw key value.
    pub fn get_raw(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self
            .keys
            .read()
            .map_err(|_| SessionError::Store("Lock poisoned".to_owned()))?
            .get(key)
            .cloned())
    }

    /// Returns true when no keys are present.
    pub fn is_empty(&self) -> bool {
        self.keys.read().map(|keys| keys.is_empty()).unwrap_or(true)
    }
}

impl Default for InMemorySnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SnapshotStore for InMemorySnapshotStore {
    async fn load(&self) -> Result<Option<CachedSnapshot>, SessionError> {
        let Some(user_data) = self.get_raw(USER_DATA_KEY)? else {
            return Ok(None);
        };
        let Some(timestamp) = self.get_raw(TIMESTAMP_KEY)? else {
            return Ok(None);
        };

        Ok(decode(&user_data, &timestamp))
    }

    async fn save(&self, snapshot: &CachedSnapshot) -> Result<(), SessionError> {
        let (user_data, timestamp) = encode(snapshot)?;

        self.set_raw(USER_DATA_KEY, user_data)?;
        self.set_raw(TIMESTAMP_KEY, timestamp)?;
        self.set_raw(ACADEMIC_LEVEL_KEY, snapshot.stats.academic_level.clone())?;

        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        let mut keys = self
            .keys
            .write()
            .map_err(|_| SessionError::Store("Lock poisoned".to_owned()))?;
        keys.remove(USER_DATA_KEY);
        keys.remove(TIMESTAMP_KEY);
        keys.remove(ACADEMIC_LEVEL_KEY);
        Ok(())
    }

    async fn academic_level(&self) -> Result<Option<String>, SessionError> {
        self.get_raw(ACADEMIC_LEVEL_KEY)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::stats::UserStats;

    #[tokio::test]
    async fn test_save_load_clear() {
        let store = InMemorySnapshotStore::new();
        assert!(store.load().await.unwrap().is_none());

        let snapshot = CachedSnapshot::capture(UserStats::fallback());
        store.save(&snapshot).await.unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded.stats, snapshot.stats);
        assert_eq!(store.academic_level().await.unwrap().as_deref(), Some("N/A"));

        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_planted_stale_timestamp() {
        let store = InMemorySnapshotStore::new();
        let snapshot = CachedSnapshot::capture(UserStats::fallback());
        store.save(&snapshot).await.unwrap();

        let stale = (Utc::now() - Duration::minutes(10)).timestamp_millis();
        store.set_raw(TIMESTAMP_KEY, stale.to_string()).unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert!(!loaded.is_fresh(Duration::minutes(5), Utc::now()));
    }
}
