mod provider;
#[cfg(any(test, feature = "mocks"))]
mod provider_mock;

use chrono::{DateTime, Utc};
pub use provider::SessionProvider;
#[cfg(any(test, feature = "mocks"))]
pub use provider_mock::MockSessionProvider;
use serde::{Deserialize, Serialize};

/// An authenticated session, as reported by the auth provider.
///
/// Owned by the provider and read-only to this crate: created by
/// sign-in, destroyed by sign-out or expiry, detected at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque user identifier.
    pub user_id: String,
    pub email: String,
    /// Display name from provider metadata, when present.
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
            name: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

#[cfg(any(test, feature = "mocks"))]
impl Session {
    pub fn mock() -> Self {
        Session::new("user-1", "test@example.com").with_name("Test User")
    }

    pub fn mock_with_id(user_id: &str) -> Self {
        Session::new(user_id, format!("{user_id}@example.com"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_construction() {
        let session = Session::new("u1", "u1@example.com").with_name("U One");
        assert_eq!(session.user_id, "u1");
        assert_eq!(session.email, "u1@example.com");
        assert_eq!(session.name.as_deref(), Some("U One"));
    }
}
