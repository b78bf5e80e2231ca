//! Published session state.
//!
//! The bootstrap sequence publishes its best-effort result here.
//! Consumers either poll the current value or subscribe to the watch
//! channels. Overlapping writers race last-write-wins, which is the
//! accepted behavior for superseded bootstraps.

use tokio::sync::watch;

use crate::stats::UserStats;

/// Handle to the currently published [`UserStats`] and loading flag.
pub struct SessionState {
    stats: watch::Sender<Option<UserStats>>,
    loading: watch::Sender<bool>,
}

impl SessionState {
    pub fn new() -> Self {
        let (stats, _) = watch::channel(None);
        let (loading, _) = watch::channel(false);
        Self { stats, loading }
    }

    /// The currently published stats, `None` when unauthenticated or
    /// not yet bootstrapped.
    pub fn stats(&self) -> Option<UserStats> {
        self.stats.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    pub fn publish(&self, stats: Option<UserStats>) {
        self.stats.send_replace(stats);
    }

    pub fn set_loading(&self, loading: bool) {
        self.loading.send_replace(loading);
    }

    /// Subscribes to stats transitions.
    pub fn subscribe_stats(&self) -> watch::Receiver<Option<UserStats>> {
        self.stats.subscribe()
    }

    /// Subscribes to loading flag transitions.
    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_and_read() {
        let state = SessionState::new();
        assert!(state.stats().is_none());
        assert!(!state.is_loading());

        state.publish(Some(UserStats::fallback()));
        assert_eq!(state.stats(), Some(UserStats::fallback()));

        state.publish(None);
        assert!(state.stats().is_none());
    }

    #[tokio::test]
    async fn test_subscribers_observe_transitions() {
        let state = SessionState::new();
        let mut stats_rx = state.subscribe_stats();
        let mut loading_rx = state.subscribe_loading();

        state.set_loading(true);
        loading_rx.changed().await.unwrap();
        assert!(*loading_rx.borrow());

        state.publish(Some(UserStats::fallback()));
        stats_rx.changed().await.unwrap();
        assert!(stats_rx.borrow().is_some());
    }
}
