//! Session provider trait.

use async_trait::async_trait;

use super::Session;
use crate::SessionError;

/// Source of truth for the current authenticated session.
///
/// Implementations wrap an external auth provider SDK. Sign-in and
/// sign-out are provider-driven; this crate only observes the current
/// session and asks the provider to end it on sign-out.
///
/// A mock implementation is available for tests:
/// [`MockSessionProvider`](super::MockSessionProvider).
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Returns the current session, or `None` when unauthenticated.
    ///
    /// Returning `None` is a normal terminal state, not an error.
    async fn current_session(&self) -> Result<Option<Session>, SessionError>;

    /// Invalidates the current session with the provider.
    async fn sign_out(&self) -> Result<(), SessionError>;
}
