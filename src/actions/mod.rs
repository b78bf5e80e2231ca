//! Session actions: the public entry points of the crate.
//!
//! Each action is a small generic struct over the trait seams it
//! needs, independently constructible and testable. The
//! [`SessionManager`](crate::SessionManager) facade bundles them.

mod bootstrap;
mod force_refresh;
mod sign_out;
mod update_level;

pub use bootstrap::{BootstrapAction, BootstrapOutcome};
pub use force_refresh::ForceRefreshAction;
pub use sign_out::SignOutAction;
pub use update_level::UpdateLevelAction;

use chrono::Utc;
use tokio::time::timeout;

use crate::backend::{BackendApi, NewUser, UserRecord};
use crate::config::{to_std, VestibuleConfig};
use crate::promo;
use crate::stats::UserStats;
use crate::SessionError;

type FetchResult = Result<UserRecord, SessionError>;

/// Fans out the fetches of one bootstrap round concurrently, each
/// raced against the per-call timeout.
///
/// With `with_ensure`, the idempotent user-creation call is fired
/// alongside the fetches; its result is swallowed after logging and
/// never blocks the round.
pub(crate) async fn fetch_pair<B: BackendApi>(
    backend: &B,
    config: &VestibuleConfig,
    new_user: &NewUser,
    with_ensure: bool,
) -> (FetchResult, FetchResult) {
    let per_call = to_std(config.fetch_timeout);
    let user_id = new_user.user_id.as_str();

    let profile = async {
        match timeout(per_call, backend.fetch_profile(user_id)).await {
            Ok(result) => result,
            Err(_) => Err(SessionError::Timeout),
        }
    };
    let stats = async {
        match timeout(per_call, backend.fetch_stats(user_id)).await {
            Ok(result) => result,
            Err(_) => Err(SessionError::Timeout),
        }
    };

    if with_ensure {
        let ensure = async {
            match timeout(per_call, backend.ensure_user(new_user)).await {
                Ok(result) => result,
                Err(_) => Err(SessionError::Timeout),
            }
        };
        let (ensure_result, profile, stats) = tokio::join!(ensure, profile, stats);
        if let Err(e) = ensure_result {
            log::warn!(
                target: "vestibule",
                "msg=\"user ensure failed\" error=\"{e}\""
            );
        }
        (profile, stats)
    } else {
        tokio::join!(profile, stats)
    }
}

/// Merges a fetched profile/stats pair into published stats: stats
/// record wins field-wise, camelCase wins within a record, launch
/// benefit applied, defaults fill the gaps.
pub(crate) fn resolve_stats(
    profile: UserRecord,
    stats: UserRecord,
    config: &VestibuleConfig,
) -> UserStats {
    let mut merged = profile.merged_with(&stats);
    promo::apply_launch_benefit(&mut merged, Utc::now(), config.launch_cutoff);
    merged.into_stats()
}

/// True when either fetch failed with the recoverable
/// "missing email information" signature.
pub(crate) fn hit_missing_email(profile: &FetchResult, stats: &FetchResult) -> bool {
    matches!(profile, Err(SessionError::MissingEmail))
        || matches!(stats, Err(SessionError::MissingEmail))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackend;
    use crate::session::Session;

    #[tokio::test]
    async fn test_fetch_pair_fires_all_three_calls() {
        let backend = MockBackend::with_records(UserRecord::default(), UserRecord::default());
        let new_user = NewUser::from_session(&Session::mock());

        let (profile, stats) =
            fetch_pair(&backend, &VestibuleConfig::default(), &new_user, true).await;

        assert!(profile.is_ok());
        assert!(stats.is_ok());
        assert_eq!(backend.ensure_count(), 1);
        assert_eq!(backend.profile_count(), 1);
        assert_eq!(backend.stats_count(), 1);
    }

    #[tokio::test]
    async fn test_fetch_pair_times_out_slow_calls() {
        let backend = MockBackend::with_records(UserRecord::default(), UserRecord::default());
        backend.set_delay(std::time::Duration::from_millis(200));

        let config = VestibuleConfig {
            fetch_timeout: chrono::Duration::milliseconds(20),
            ..Default::default()
        };
        let new_user = NewUser::from_session(&Session::mock());

        let (profile, stats) = fetch_pair(&backend, &config, &new_user, false).await;

        assert_eq!(profile.unwrap_err(), SessionError::Timeout);
        assert_eq!(stats.unwrap_err(), SessionError::Timeout);
    }

    #[tokio::test]
    async fn test_fetch_pair_swallows_ensure_failure() {
        let backend = MockBackend::with_records(UserRecord::default(), UserRecord::default());
        *backend.ensure_response.lock().unwrap() =
            Err(SessionError::Transport("boom".to_owned()));
        let new_user = NewUser::from_session(&Session::mock());

        let (profile, stats) =
            fetch_pair(&backend, &VestibuleConfig::default(), &new_user, true).await;

        assert!(profile.is_ok());
        assert!(stats.is_ok());
    }

    #[test]
    fn test_hit_missing_email_on_either_side() {
        let ok: FetchResult = Ok(UserRecord::default());
        let missing: FetchResult = Err(SessionError::MissingEmail);
        let other: FetchResult = Err(SessionError::Timeout);

        assert!(hit_missing_email(&missing, &ok));
        assert!(hit_missing_email(&ok, &missing));
        assert!(!hit_missing_email(&other, &ok));
    }
}
