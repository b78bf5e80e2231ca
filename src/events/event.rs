use chrono::{DateTime, Utc};

use crate::stats::StatsSource;

/// Session lifecycle events emitted by vestibule actions.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// Stats were resolved and published, from whichever source won.
    StatsResolved {
        user_id: String,
        source: StatsSource,
        at: DateTime<Utc>,
    },

    /// A force refresh failed; the previously published stats stand.
    RefreshFailed {
        user_id: String,
        at: DateTime<Utc>,
    },

    /// The session ended and local state was cleared.
    SignedOut {
        at: DateTime<Utc>,
    },

    /// The academic level was updated on the server and locally.
    LevelUpdated {
        user_id: String,
        level: String,
        at: DateTime<Utc>,
    },
}

impl SessionEvent {
    /// Returns a dot-separated event name for logging/tracing.
    pub fn name(&self) -> &'static str {
        match self {
            Self::StatsResolved { .. } => "session.stats_resolved",
            Self::RefreshFailed { .. } => "session.refresh_failed",
            Self::SignedOut { .. } => "session.signed_out",
            Self::LevelUpdated { .. } => "session.level_updated",
        }
    }

    /// Returns the timestamp when this event occurred.
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::StatsResolved { at, .. }
            | Self::RefreshFailed { at, .. }
            | Self::SignedOut { at, .. }
            | Self::LevelUpdated { at, .. } => *at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        let now = Utc::now();

        assert_eq!(
            SessionEvent::StatsResolved {
                user_id: "u1".to_owned(),
                source: StatsSource::Network,
                at: now,
            }
            .name(),
            "session.stats_resolved"
        );
        assert_eq!(SessionEvent::SignedOut { at: now }.name(), "session.signed_out");
    }

    #[test]
    fn test_event_timestamp() {
        let now = Utc::now();
        let event = SessionEvent::RefreshFailed {
            user_id: "u1".to_owned(),
            at: now,
        };
        assert_eq!(event.timestamp(), now);
    }
}
