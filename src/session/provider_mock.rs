#![allow(clippy::unwrap_used)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{Session, SessionProvider};
use crate::SessionError;

#[derive(Clone)]
pub struct MockSessionProvider {
    pub session: Arc<Mutex<Option<Session>>>,
    pub sign_out_calls: Arc<AtomicUsize>,
}

impl MockSessionProvider {
    /// A provider with no active session.
    pub fn new() -> Self {
        Self {
            session: Arc::new(Mutex::new(None)),
            sign_out_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A provider already signed in with the given session.
    pub fn signed_in(session: Session) -> Self {
        let provider = Self::new();
        *provider.session.lock().unwrap() = Some(session);
        provider
    }

    pub fn sign_out_count(&self) -> usize {
        self.sign_out_calls.load(Ordering::SeqCst)
    }
}

impl Default for MockSessionProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionProvider for MockSessionProvider {
    async fn current_session(&self) -> Result<Option<Session>, SessionError> {
        Ok(self.session.lock().unwrap().clone())
    }

    async fn sign_out(&self) -> Result<(), SessionError> {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
        *self.session.lock().unwrap() = None;
        Ok(())
    }
}
