use std::sync::Arc;

use chrono::Utc;

use super::{fetch_pair, resolve_stats};
use crate::backend::{BackendApi, NewUser};
use crate::config::VestibuleConfig;
use crate::events::{dispatch, SessionEvent};
use crate::navigation::{Navigator, Route};
use crate::session::SessionProvider;
use crate::snapshot::{CachedSnapshot, SnapshotStore};
use crate::state::SessionState;
use crate::stats::StatsSource;

/// Caller-triggered refresh that bypasses the snapshot cache.
///
/// Unlike bootstrap, a failed refresh does not degrade to stale data:
/// it reports failure and leaves the previously published stats
/// untouched.
pub struct ForceRefreshAction<P, B, S, N> {
    provider: P,
    backend: B,
    store: S,
    navigator: N,
    state: Arc<SessionState>,
    config: VestibuleConfig,
}

impl<P, B, S, N> ForceRefreshAction<P, B, S, N>
where
    P: SessionProvider,
    B: BackendApi,
    S: SnapshotStore,
    N: Navigator,
{
    pub fn new(
        provider: P,
        backend: B,
        store: S,
        navigator: N,
        state: Arc<SessionState>,
        config: VestibuleConfig,
    ) -> Self {
        Self {
            provider,
            backend,
            store,
            navigator,
            state,
            config,
        }
    }

    /// Refreshes stats from the backend unconditionally.
    ///
    /// Returns `true` on success. Any failure (no session, timeout,
    /// fetch error) returns `false` without touching published stats.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "force_refresh", skip_all)
    )]
    pub async fn execute(&self) -> bool {
        let session = match self.provider.current_session().await {
            Ok(Some(session)) => session,
            Ok(None) => {
                log::warn!(
                    target: "vestibule",
                    "msg=\"force refresh without a session\""
                );
                return false;
            }
            Err(e) => {
                log::warn!(
                    target: "vestibule",
                    "msg=\"session lookup failed during force refresh\" error=\"{e}\""
                );
                return false;
            }
        };

        let new_user = NewUser::from_session(&session);
        let (profile, stats) = fetch_pair(&self.backend, &self.config, &new_user, true).await;

        let (profile, stats) = match (profile, stats) {
            (Ok(profile), Ok(stats)) => (profile, stats),
            (profile, stats) => {
                if let Err(e) = &profile {
                    log::warn!(
                        target: "vestibule",
                        "msg=\"force refresh profile fetch failed\" error=\"{e}\""
                    );
                }
                if let Err(e) = &stats {
                    log::warn!(
                        target: "vestibule",
                        "msg=\"force refresh stats fetch failed\" error=\"{e}\""
                    );
                }
                dispatch(SessionEvent::RefreshFailed {
                    user_id: session.user_id.clone(),
                    at: Utc::now(),
                })
                .await;
                return false;
            }
        };

        let resolved = resolve_stats(profile, stats, &self.config);

        let snapshot = CachedSnapshot::capture(resolved.clone());
        if let Err(e) = self.store.save(&snapshot).await {
            log::warn!(
                target: "vestibule",
                "msg=\"failed to persist refreshed snapshot\" error=\"{e}\""
            );
        }

        self.state.publish(Some(resolved));
        if self.navigator.current_route() == Route::Landing {
            self.navigator.redirect(Route::Dashboard);
        }
        dispatch(SessionEvent::StatsResolved {
            user_id: session.user_id,
            source: StatsSource::Network,
            at: Utc::now(),
        })
        .await;

        true
    }
}
