use std::sync::Arc;

use chrono::Utc;
use tokio::time::timeout;

use super::{fetch_pair, hit_missing_email, resolve_stats};
use crate::backend::{BackendApi, NewUser, UserRecord};
use crate::config::{to_std, VestibuleConfig};
use crate::events::{dispatch, SessionEvent};
use crate::navigation::{Navigator, Route};
use crate::session::{Session, SessionProvider};
use crate::snapshot::{CachedSnapshot, SnapshotStore};
use crate::state::SessionState;
use crate::stats::{StatsSource, UserStats};
use crate::SessionError;

/// How a bootstrap invocation concluded.
///
/// Every variant is a normal terminal state; bootstrap never errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// No active session. Published stats are `None`, cache cleared.
    Unauthenticated,
    /// A fresh snapshot short-circuited the round; no network calls.
    CacheHit,
    /// Stats were resolved from the given source.
    Resolved(StatsSource),
}

/// Resolves a consistent, best-effort [`UserStats`] for the current
/// session: fresh cache short-circuit, concurrent backend fetches,
/// bounded self-healing retry, cache/default fallback.
///
/// Covers two of the trigger conditions with the same algorithm:
/// application mount with an existing session, and a sign-in-completed
/// notification from the provider.
pub struct BootstrapAction<P, B, S, N> {
    provider: P,
    backend: B,
    store: S,
    navigator: N,
    state: Arc<SessionState>,
    config: VestibuleConfig,
}

impl<P, B, S, N> BootstrapAction<P, B, S, N>
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

    /// Runs one bootstrap invocation.
    ///
    /// Never returns an error: every failure degrades to the best
    /// available data. The loading flag is set on entry and cleared
    /// exactly once on every path; the whole run is bounded by the
    /// configured hard deadline, independent of the per-call timeouts.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "bootstrap", skip_all)
    )]
    pub async fn execute(&self) -> BootstrapOutcome {
        self.state.set_loading(true);

        let deadline = to_std(self.config.bootstrap_deadline);
        let outcome = match timeout(deadline, self.run()).await {
            Ok(outcome) => outcome,
            Err(_) => {
                log::warn!(
                    target: "vestibule",
                    "msg=\"bootstrap deadline exceeded, degrading\""
                );
                self.publish_fallback(None).await
            }
        };

        self.state.set_loading(false);
        outcome
    }

    async fn run(&self) -> BootstrapOutcome {
        let session = match self.provider.current_session().await {
            Ok(session) => session,
            Err(e) => {
                log::warn!(
                    target: "vestibule",
                    "msg=\"session lookup failed, treating as unauthenticated\" error=\"{e}\""
                );
                None
            }
        };

        let Some(session) = session else {
            if let Err(e) = self.store.clear().await {
                log::warn!(
                    target: "vestibule",
                    "msg=\"failed to clear snapshot on sign-out state\" error=\"{e}\""
                );
            }
            self.state.publish(None);
            return BootstrapOutcome::Unauthenticated;
        };

        match self.store.load().await {
            Ok(Some(snapshot)) if snapshot.is_fresh(self.config.cache_ttl, Utc::now()) => {
                self.state.publish(Some(snapshot.stats));
                self.redirect_if_landing();
                dispatch(SessionEvent::StatsResolved {
                    user_id: session.user_id.clone(),
                    source: StatsSource::Cache,
                    at: Utc::now(),
                })
                .await;
                return BootstrapOutcome::CacheHit;
            }
            Ok(_) => {}
            Err(e) => {
                log::warn!(
                    target: "vestibule",
                    "msg=\"snapshot load failed, fetching\" error=\"{e}\""
                );
            }
        }

        let new_user = NewUser::from_session(&session);
        let (profile, stats) = fetch_pair(&self.backend, &self.config, &new_user, true).await;

        let (profile, stats) = match (profile, stats) {
            (Ok(profile), Ok(stats)) => (profile, stats),
            (profile, stats) => {
                if hit_missing_email(&profile, &stats) {
                    match self.retry_after_create(&new_user).await {
                        Some(records) => records,
                        None => return self.publish_fallback(Some(&session)).await,
                    }
                } else {
                    log_fetch_failure(&profile, &stats);
                    return self.publish_fallback(Some(&session)).await;
                }
            }
        };

        self.resolve_network(&session, profile, stats).await
    }

    /// The single bounded self-healing retry for the recoverable
    /// "missing email information" signature: re-create the user, then
    /// refetch once. No further attempts.
    async fn retry_after_create(
        &self,
        new_user: &NewUser,
    ) -> Option<(UserRecord, UserRecord)> {
        log::info!(
            target: "vestibule",
            "msg=\"missing email signature, retrying after user create\" user_id={}",
            new_user.user_id
        );

        let per_call = to_std(self.config.fetch_timeout);
        let created = match timeout(per_call, self.backend.ensure_user(new_user)).await {
            Ok(result) => result,
            Err(_) => Err(SessionError::Timeout),
        };
        if let Err(e) = created {
            log::warn!(
                target: "vestibule",
                "msg=\"user create during retry failed\" error=\"{e}\""
            );
            return None;
        }

        let (profile, stats) = fetch_pair(&self.backend, &self.config, new_user, false).await;
        match (profile, stats) {
            (Ok(profile), Ok(stats)) => Some((profile, stats)),
            (profile, stats) => {
                log_fetch_failure(&profile, &stats);
                None
            }
        }
    }

    async fn resolve_network(
        &self,
        session: &Session,
        profile: UserRecord,
        stats: UserRecord,
    ) -> BootstrapOutcome {
        let resolved = resolve_stats(profile, stats, &self.config);

        let snapshot = CachedSnapshot::capture(resolved.clone());
        if let Err(e) = self.store.save(&snapshot).await {
            log::warn!(
                target: "vestibule",
                "msg=\"failed to persist snapshot\" error=\"{e}\""
            );
        }

        self.state.publish(Some(resolved));
        self.redirect_if_landing();
        dispatch(SessionEvent::StatsResolved {
            user_id: session.user_id.clone(),
            source: StatsSource::Network,
            at: Utc::now(),
        })
        .await;

        BootstrapOutcome::Resolved(StatsSource::Network)
    }

    /// Degraded resolution: any prior snapshot wins over the
    /// hard-coded defaults. The UI is never left without stats merely
    /// because the network failed.
    async fn publish_fallback(&self, session: Option<&Session>) -> BootstrapOutcome {
        let user_id = session
            .map(|s| s.user_id.clone())
            .unwrap_or_else(|| "unknown".to_owned());

        match self.store.load().await {
            Ok(Some(snapshot)) => {
                log::info!(
                    target: "vestibule",
                    "msg=\"degrading to cached snapshot\" user_id={user_id}"
                );
                self.state.publish(Some(snapshot.stats));
                dispatch(SessionEvent::StatsResolved {
                    user_id,
                    source: StatsSource::Cache,
                    at: Utc::now(),
                })
                .await;
                BootstrapOutcome::Resolved(StatsSource::Cache)
            }
            _ => {
                log::info!(
                    target: "vestibule",
                    "msg=\"no snapshot available, publishing defaults\" user_id={user_id}"
                );
                let stats = UserStats::fallback();
                if let Err(e) = self.store.save(&CachedSnapshot::capture(stats.clone())).await {
                    log::warn!(
                        target: "vestibule",
                        "msg=\"failed to persist default snapshot\" error=\"{e}\""
                    );
                }
                self.state.publish(Some(stats));
                dispatch(SessionEvent::StatsResolved {
                    user_id,
                    source: StatsSource::Default,
                    at: Utc::now(),
                })
                .await;
                BootstrapOutcome::Resolved(StatsSource::Default)
            }
        }
    }

    fn redirect_if_landing(&self) {
        if self.navigator.current_route() == Route::Landing {
            self.navigator.redirect(Route::Dashboard);
        }
    }
}

fn log_fetch_failure(
    profile: &Result<UserRecord, SessionError>,
    stats: &Result<UserRecord, SessionError>,
) {
    if let Err(e) = profile {
        log::warn!(target: "vestibule", "msg=\"profile fetch failed\" error=\"{e}\"");
    }
    if let Err(e) = stats {
        log::warn!(target: "vestibule", "msg=\"stats fetch failed\" error=\"{e}\"");
    }
}
