use std::sync::Arc;

use chrono::Utc;

use crate::events::{dispatch, SessionEvent};
use crate::session::SessionProvider;
use crate::snapshot::SnapshotStore;
use crate::state::SessionState;

/// Ends the session: provider sign-out, published stats cleared,
/// snapshot cache deleted.
pub struct SignOutAction<P, S> {
    provider: P,
    store: S,
    state: Arc<SessionState>,
}

impl<P, S> SignOutAction<P, S>
where
    P: SessionProvider,
    S: SnapshotStore,
{
    pub fn new(provider: P, store: S, state: Arc<SessionState>) -> Self {
        Self {
            provider,
            store,
            state,
        }
    }

    /// Signs the user out. Never errors; provider and store failures
    /// are logged, local state is cleared regardless.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "sign_out", skip_all)
    )]
    pub async fn execute(&self) {
        if let Err(e) = self.provider.sign_out().await {
            log::warn!(
                target: "vestibule",
                "msg=\"provider sign-out failed, clearing local state anyway\" error=\"{e}\""
            );
        }

        self.state.publish(None);

        if let Err(e) = self.store.clear().await {
            log::warn!(
                target: "vestibule",
                "msg=\"failed to clear snapshot on sign-out\" error=\"{e}\""
            );
        }

        dispatch(SessionEvent::SignedOut { at: Utc::now() }).await;

        log::info!(target: "vestibule", "msg=\"sign-out complete\"");
    }
}
