mod http;
#[cfg(any(test, feature = "mocks"))]
mod mock;
mod record;

use async_trait::async_trait;
pub use http::HttpBackend;
#[cfg(any(test, feature = "mocks"))]
pub use mock::MockBackend;
pub use record::UserRecord;
use serde::Serialize;

use crate::session::Session;
use crate::SessionError;

/// Payload for the idempotent create-or-noop user call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewUser {
    pub user_id: String,
    pub email: String,
    pub name: String,
}

impl NewUser {
    pub fn from_session(session: &Session) -> Self {
        Self {
            user_id: session.user_id.clone(),
            email: session.email.clone(),
            name: session.name.clone().unwrap_or_default(),
        }
    }
}

/// The backend HTTP contract consumed by the bootstrap sequence.
///
/// Implementations:
/// - [`HttpBackend`]: reqwest-based client for the real API
/// - [`MockBackend`]: scripted responses for tests
#[async_trait]
pub trait BackendApi: Send + Sync {
    /// Ensures a backend user record exists for this session.
    ///
    /// Idempotent create-or-noop. Most non-2xx responses are tolerated
    /// and reported as `Ok(())`; only transport failures and the
    /// "missing email information" signature surface as errors.
    async fn ensure_user(&self, user: &NewUser) -> Result<(), SessionError>;

    /// Fetches the user's profile record.
    async fn fetch_profile(&self, user_id: &str) -> Result<UserRecord, SessionError>;

    /// Fetches the user's usage stats record.
    ///
    /// Same shape class as the profile; treated as a second
    /// independent fetch.
    async fn fetch_stats(&self, user_id: &str) -> Result<UserRecord, SessionError>;

    /// Updates the server-side academic level.
    async fn update_academic_level(&self, user_id: &str, level: &str)
        -> Result<(), SessionError>;
}
