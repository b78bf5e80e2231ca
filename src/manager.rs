//! Facade bundling the session actions behind one shared state handle.

use std::sync::Arc;

use crate::actions::{
    BootstrapAction, BootstrapOutcome, ForceRefreshAction, SignOutAction, UpdateLevelAction,
};
use crate::backend::BackendApi;
use crate::config::VestibuleConfig;
use crate::navigation::Navigator;
use crate::session::SessionProvider;
use crate::snapshot::SnapshotStore;
use crate::state::SessionState;
use crate::SessionError;

/// The public surface of the crate: one manager per application,
/// wired with the embedding app's provider, backend client, snapshot
/// store and navigator.
///
/// # Example
///
/// ```rust,ignore
/// use vestibule::{HttpBackend, FileSnapshotStore, NoopNavigator, SessionManager, VestibuleConfig};
///
/// let manager = SessionManager::new(
///     my_auth_provider,
///     HttpBackend::new("https://api.example.com"),
///     FileSnapshotStore::new("/var/lib/myapp/session")?,
///     NoopNavigator,
///     VestibuleConfig::default(),
/// );
///
/// // on application mount, and again on every sign-in notification:
/// let outcome = manager.bootstrap().await;
/// ```
pub struct SessionManager<P, B, S, N> {
    state: Arc<SessionState>,
    bootstrap: BootstrapAction<P, B, S, N>,
    refresh: ForceRefreshAction<P, B, S, N>,
    sign_out: SignOutAction<P, S>,
    update_level: UpdateLevelAction<P, B, S>,
}

impl<P, B, S, N> SessionManager<P, B, S, N>
where
    P: SessionProvider + Clone,
    B: BackendApi + Clone,
    S: SnapshotStore + Clone,
    N: Navigator + Clone,
{
    pub fn new(provider: P, backend: B, store: S, navigator: N, config: VestibuleConfig) -> Self {
        let state = Arc::new(SessionState::new());

        Self {
            bootstrap: BootstrapAction::new(
                provider.clone(),
                backend.clone(),
                store.clone(),
                navigator.clone(),
                state.clone(),
                config.clone(),
            ),
            refresh: ForceRefreshAction::new(
                provider.clone(),
                backend.clone(),
                store.clone(),
                navigator,
                state.clone(),
                config.clone(),
            ),
            sign_out: SignOutAction::new(provider.clone(), store.clone(), state.clone()),
            update_level: UpdateLevelAction::new(provider, backend, store, state.clone(), config),
            state,
        }
    }

    /// Resolves best-effort stats for the current session. Call on
    /// application mount and on every sign-in notification.
    pub async fn bootstrap(&self) -> BootstrapOutcome {
        self.bootstrap.execute().await
    }

    /// Bypasses the cache and refetches. Returns `false` on failure,
    /// leaving published stats untouched.
    pub async fn force_refresh(&self) -> bool {
        self.refresh.execute().await
    }

    /// Ends the session and clears all local state.
    pub async fn sign_out(&self) {
        self.sign_out.execute().await
    }

    /// Updates the academic level on the server and in local caches.
    pub async fn update_academic_level(&self, level: &str) -> Result<(), SessionError> {
        self.update_level.execute(level).await
    }

    /// The shared published-state handle.
    pub fn state(&self) -> &Arc<SessionState> {
        &self.state
    }
}
