use std::sync::Arc;

use chrono::Utc;
use tokio::time::timeout;

use crate::backend::BackendApi;
use crate::config::{to_std, VestibuleConfig};
use crate::events::{dispatch, SessionEvent};
use crate::session::SessionProvider;
use crate::snapshot::{CachedSnapshot, SnapshotStore};
use crate::state::SessionState;
use crate::SessionError;

/// Updates the user's academic level on the server and keeps the
/// local caches (snapshot and fast-path key) in sync.
///
/// Unlike the bootstrap entry points, this surfaces errors to the
/// caller: a failed server update leaves local state untouched.
pub struct UpdateLevelAction<P, B, S> {
    provider: P,
    backend: B,
    store: S,
    state: Arc<SessionState>,
    config: VestibuleConfig,
}

impl<P, B, S> UpdateLevelAction<P, B, S>
where
    P: SessionProvider,
    B: BackendApi,
    S: SnapshotStore,
{
    pub fn new(
        provider: P,
        backend: B,
        store: S,
        state: Arc<SessionState>,
        config: VestibuleConfig,
    ) -> Self {
        Self {
            provider,
            backend,
            store,
            state,
            config,
        }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "update_level", skip_all, err)
    )]
    pub async fn execute(&self, level: &str) -> Result<(), SessionError> {
        let session = self
            .provider
            .current_session()
            .await?
            .ok_or_else(|| SessionError::Provider("no active session".to_owned()))?;

        let per_call = to_std(self.config.fetch_timeout);
        match timeout(
            per_call,
            self.backend.update_academic_level(&session.user_id, level),
        )
        .await
        {
            Ok(result) => result?,
            Err(_) => return Err(SessionError::Timeout),
        }

        // sync the published stats and the snapshot, when present
        if let Some(mut stats) = self.state.stats() {
            level.clone_into(&mut stats.academic_level);
            let snapshot = CachedSnapshot::capture(stats.clone());
            if let Err(e) = self.store.save(&snapshot).await {
                log::warn!(
                    target: "vestibule",
                    "msg=\"failed to persist snapshot after level update\" error=\"{e}\""
                );
            }
            self.state.publish(Some(stats));
        }

        dispatch(SessionEvent::LevelUpdated {
            user_id: session.user_id,
            level: level.to_owned(),
            at: Utc::now(),
        })
        .await;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackend;
    use crate::session::{MockSessionProvider, Session};
    use crate::snapshot::InMemorySnapshotStore;
    use crate::stats::UserStats;

    #[tokio::test]
    async fn test_update_level_syncs_local_caches() {
        let store = InMemorySnapshotStore::new();
        let state = Arc::new(SessionState::new());
        state.publish(Some(UserStats::fallback()));

        let action = UpdateLevelAction::new(
            MockSessionProvider::signed_in(Session::mock()),
            MockBackend::new(),
            store.clone(),
            state.clone(),
            VestibuleConfig::default(),
        );

        action.execute("alevel").await.unwrap();

        assert_eq!(state.stats().unwrap().academic_level, "alevel");
        assert_eq!(
            store.academic_level().await.unwrap().as_deref(),
            Some("alevel")
        );
        assert_eq!(
            store.load().await.unwrap().unwrap().stats.academic_level,
            "alevel"
        );
    }

    #[tokio::test]
    async fn test_server_failure_leaves_local_state_untouched() {
        let backend = MockBackend::new();
        *backend.level_response.lock().unwrap() =
            Err(SessionError::HttpStatus(500, "server error".to_owned()));

        let state = Arc::new(SessionState::new());
        state.publish(Some(UserStats::fallback()));

        let action = UpdateLevelAction::new(
            MockSessionProvider::signed_in(Session::mock()),
            backend,
            InMemorySnapshotStore::new(),
            state.clone(),
            VestibuleConfig::default(),
        );

        let result = action.execute("alevel").await;

        assert!(result.is_err());
        assert_eq!(state.stats().unwrap().academic_level, "N/A");
    }

    #[tokio::test]
    async fn test_requires_session() {
        let action = UpdateLevelAction::new(
            MockSessionProvider::new(),
            MockBackend::new(),
            InMemorySnapshotStore::new(),
            Arc::new(SessionState::new()),
            VestibuleConfig::default(),
        );

        assert!(action.execute("gcse").await.is_err());
    }
}
