//! The snapshot cache: last-known user stats plus a capture timestamp.
//!
//! Stores mirror the three fixed keys of the browser-storage layout
//! this crate replaces: `userData` (JSON stats), `userDataTimestamp`
//! (epoch-millis string) and `academicLevel` (plain string fast-path).
//! The cache is keyed by those fixed names, not per-user; switching
//! users overwrites the previous snapshot.

mod file_store;
mod memory_store;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
pub use file_store::FileSnapshotStore;
pub use memory_store::InMemorySnapshotStore;

use crate::stats::UserStats;
use crate::SessionError;

pub const USER_DATA_KEY: &str = "userData";
pub const TIMESTAMP_KEY: &str = "userDataTimestamp";
pub const ACADEMIC_LEVEL_KEY: &str = "academicLevel";

/// A serialized copy of the last-known [`UserStats`].
///
/// Fresh while `now - captured_at < ttl`; a stale snapshot triggers a
/// refetch but may still serve as a last-resort fallback when the
/// fetch fails.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedSnapshot {
    pub stats: UserStats,
    pub captured_at: DateTime<Utc>,
}

impl CachedSnapshot {
    /// Captures the given stats as of now.
    pub fn capture(stats: UserStats) -> Self {
        Self {
            stats,
            captured_at: Utc::now(),
        }
    }

    pub fn is_fresh(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        now - self.captured_at < ttl
    }
}

/// Storage for the snapshot cache.
///
/// Implementations provide different backends:
/// - [`InMemorySnapshotStore`]: in-memory storage for tests and
///   single-run processes
/// - [`FileSnapshotStore`]: one file per key in a directory
///
/// Writers are deliberately uncoordinated; overlapping refreshes race
/// last-write-wins on this non-critical cache.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Loads the cached snapshot, regardless of age.
    ///
    /// Corrupt or partially missing data is reported as `Ok(None)`,
    /// never as an error; callers fall through to defaults.
    async fn load(&self) -> Result<Option<CachedSnapshot>, SessionError>;

    /// Overwrites the cached snapshot, including the fast-path
    /// `academicLevel` key.
    async fn save(&self, snapshot: &CachedSnapshot) -> Result<(), SessionError>;

    /// Removes all three keys.
    async fn clear(&self) -> Result<(), SessionError>;

    /// Reads the fast-path academic level key.
    async fn academic_level(&self) -> Result<Option<String>, SessionError>;
}

/// Decodes the two persisted values back into a snapshot.
///
/// Any parse failure is logged and collapses to `None`.
pub(crate) fn decode(user_data: &str, timestamp: &str) -> Option<CachedSnapshot> {
    let stats: UserStats = match serde_json::from_str(user_data) {
        Ok(stats) => stats,
        Err(e) => {
            log::warn!(
                target: "vestibule",
                "msg=\"corrupt cached user data, ignoring\" error=\"{e}\""
            );
            return None;
        }
    };

    let millis: i64 = match timestamp.trim().parse() {
        Ok(millis) => millis,
        Err(e) => {
            log::warn!(
                target: "vestibule",
                "msg=\"corrupt cache timestamp, ignoring\" error=\"{e}\""
            );
            return None;
        }
    };

    let captured_at = DateTime::from_timestamp_millis(millis)?;
    Some(CachedSnapshot { stats, captured_at })
}

/// Encodes a snapshot into its two persisted values.
pub(crate) fn encode(snapshot: &CachedSnapshot) -> Result<(String, String), SessionError> {
    let user_data = serde_json::to_string(&snapshot.stats)
        .map_err(|e| SessionError::Parse(e.to_string()))?;
    let timestamp = snapshot.captured_at.timestamp_millis().to_string();
    Ok((user_data, timestamp))
}
