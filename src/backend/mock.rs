#![allow(clippy::unwrap_used)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{BackendApi, NewUser, UserRecord};
use crate::SessionError;

/// Scripted backend for tests.
///
/// Fetch calls pop responses from per-endpoint queues; an empty queue
/// behaves like a failing backend. Call counts are tracked so tests
/// can assert how many network calls were made.
#[derive(Clone)]
pub struct MockBackend {
    pub profile_responses: Arc<Mutex<VecDeque<Result<UserRecord, SessionError>>>>,
    pub stats_responses: Arc<Mutex<VecDeque<Result<UserRecord, SessionError>>>>,
    pub ensure_response: Arc<Mutex<Result<(), SessionError>>>,
    pub level_response: Arc<Mutex<Result<(), SessionError>>>,
    /// Artificial delay applied before every response.
    pub delay: Arc<Mutex<Option<std::time::Duration>>>,

    pub ensure_calls: Arc<AtomicUsize>,
    pub profile_calls: Arc<AtomicUsize>,
    pub stats_calls: Arc<AtomicUsize>,
    pub level_calls: Arc<AtomicUsize>,
}

impl MockBackend {
    /// A backend where every fetch fails (empty queues).
    pub fn new() -> Self {
        Self {
            profile_responses: Arc::new(Mutex::new(VecDeque::new())),
            stats_responses: Arc::new(Mutex::new(VecDeque::new())),
            ensure_response: Arc::new(Mutex::new(Ok(()))),
            level_response: Arc::new(Mutex::new(Ok(()))),
            delay: Arc::new(Mutex::new(None)),
            ensure_calls: Arc::new(AtomicUsize::new(0)),
            profile_calls: Arc::new(AtomicUsize::new(0)),
            stats_calls: Arc::new(AtomicUsize::new(0)),
            level_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A backend scripted to answer one fetch round successfully.
    pub fn with_records(profile: UserRecord, stats: UserRecord) -> Self {
        let backend = Self::new();
        backend.push_profile(Ok(profile));
        backend.push_stats(Ok(stats));
        backend
    }

    pub fn push_profile(&self, response: Result<UserRecord, SessionError>) {
        self.profile_responses.lock().unwrap().push_back(response);
    }

    pub fn push_stats(&self, response: Result<UserRecord, SessionError>) {
        self.stats_responses.lock().unwrap().push_back(response);
    }

    pub fn set_delay(&self, delay: std::time::Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn ensure_count(&self) -> usize {
        self.ensure_calls.load(Ordering::SeqCst)
    }

    pub fn profile_count(&self) -> usize {
        self.profile_calls.load(Ordering::SeqCst)
    }

    pub fn stats_count(&self) -> usize {
        self.stats_calls.load(Ordering::SeqCst)
    }

    pub fn total_fetches(&self) -> usize {
        self.profile_count() + self.stats_count()
    }

    async fn apply_delay(&self) {
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn pop(
        queue: &Mutex<VecDeque<Result<UserRecord, SessionError>>>,
    ) -> Result<UserRecord, SessionError> {
        queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(SessionError::Transport("no scripted response".to_owned())))
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BackendApi for MockBackend {
    async fn ensure_user(&self, _user: &NewUser) -> Result<(), SessionError> {
        self.ensure_calls.fetch_add(1, Ordering::SeqCst);
        self.apply_delay().await;
        self.ensure_response.lock().unwrap().clone()
    }

    async fn fetch_profile(&self, _user_id: &str) -> Result<UserRecord, SessionError> {
        self.profile_calls.fetch_add(1, Ordering::SeqCst);
        self.apply_delay().await;
        Self::pop(&self.profile_responses)
    }

    async fn fetch_stats(&self, _user_id: &str) -> Result<UserRecord, SessionError> {
        self.stats_calls.fetch_add(1, Ordering::SeqCst);
        self.apply_delay().await;
        Self::pop(&self.stats_responses)
    }

    async fn update_academic_level(
        &self,
        _user_id: &str,
        _level: &str,
    ) -> Result<(), SessionError> {
        self.level_calls.fetch_add(1, Ordering::SeqCst);
        self.apply_delay().await;
        self.level_response.lock().unwrap().clone()
    }
}
