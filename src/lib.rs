pub mod actions;
pub mod backend;
pub mod config;
pub mod events;
pub mod manager;
pub mod navigation;
pub mod promo;
pub mod session;
pub mod snapshot;
pub mod state;
pub mod stats;

pub use actions::{
    BootstrapAction, BootstrapOutcome, ForceRefreshAction, SignOutAction, UpdateLevelAction,
};
pub use backend::{BackendApi, HttpBackend, NewUser, UserRecord};
pub use config::VestibuleConfig;
pub use manager::SessionManager;
pub use navigation::{Navigator, NoopNavigator, Route};
pub use session::{Session, SessionProvider};
pub use snapshot::{CachedSnapshot, FileSnapshotStore, InMemorySnapshotStore, SnapshotStore};
pub use state::SessionState;
pub use stats::{Plan, StatsSource, UserStats};

pub use events::register_event_listeners;

#[cfg(any(test, feature = "mocks"))]
pub use backend::MockBackend;
#[cfg(any(test, feature = "mocks"))]
pub use navigation::MockNavigator;
#[cfg(any(test, feature = "mocks"))]
pub use session::MockSessionProvider;

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    Timeout,
    MissingEmail,
    HttpStatus(u16, String),
    Transport(String),
    Store(String),
    Parse(String),
    Provider(String),
}

impl std::error::Error for SessionError {}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Timeout => write!(f, "Request timed out"),
            SessionError::MissingEmail => write!(f, "Missing email information"),
            SessionError::HttpStatus(status, msg) => {
                write!(f, "Unexpected HTTP status {}: {}", status, msg)
            }
            SessionError::Transport(msg) => write!(f, "Transport error: {}", msg),
            SessionError::Store(msg) => write!(f, "Snapshot store error: {}", msg),
            SessionError::Parse(msg) => write!(f, "Parse error: {}", msg),
            SessionError::Provider(msg) => write!(f, "Session provider error: {}", msg),
        }
    }
}
