//! reqwest-based backend client.

use async_trait::async_trait;
use reqwest::StatusCode;

use super::{BackendApi, NewUser, UserRecord};
use crate::SessionError;

/// HTTP client for the backend API.
///
/// Timeouts are owned by the callers (each call is raced against the
/// configured per-call timer), so the underlying client is built
/// without one.
#[derive(Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// Creates a client for the given API base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Creates a client reusing an existing `reqwest::Client`.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn fetch_record(&self, user_id: &str) -> Result<UserRecord, SessionError> {
        let response = self
            .client
            .get(self.url(&format!("/users/{user_id}")))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::BAD_REQUEST {
            let body = response.text().await.unwrap_or_default();
            if is_missing_email(&body) {
                return Err(SessionError::MissingEmail);
            }
            return Err(SessionError::HttpStatus(status.as_u16(), body));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SessionError::HttpStatus(status.as_u16(), body));
        }

        response
            .json::<UserRecord>()
            .await
            .map_err(|e| SessionError::Parse(e.to_string()))
    }
}

/// The recoverable 400 signature emitted when a backend user record
/// was created without an email.
fn is_missing_email(body: &str) -> bool {
    body.to_ascii_lowercase().contains("missing email information")
}

impl From<reqwest::Error> for SessionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SessionError::Timeout
        } else if err.is_decode() {
            SessionError::Parse(err.to_string())
        } else {
            SessionError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl BackendApi for HttpBackend {
    async fn ensure_user(&self, user: &NewUser) -> Result<(), SessionError> {
        let response = self
            .client
            .post(self.url("/users"))
            .json(user)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::BAD_REQUEST {
            let body = response.text().await.unwrap_or_default();
            if is_missing_email(&body) {
                return Err(SessionError::MissingEmail);
            }
        }
        if !status.is_success() {
            // Create-or-noop: conflicts and validation noise are expected.
            log::debug!(
                target: "vestibule",
                "msg=\"ensure_user tolerated non-2xx\" status={}",
                status.as_u16()
            );
        }

        Ok(())
    }

    async fn fetch_profile(&self, user_id: &str) -> Result<UserRecord, SessionError> {
        self.fetch_record(user_id).await
    }

    async fn fetch_stats(&self, user_id: &str) -> Result<UserRecord, SessionError> {
        self.fetch_record(user_id).await
    }

    async fn update_academic_level(
        &self,
        user_id: &str,
        level: &str,
    ) -> Result<(), SessionError> {
        let response = self
            .client
            .put(self.url(&format!("/users/{user_id}")))
            .json(&serde_json::json!({ "academic_level": level }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SessionError::HttpStatus(status.as_u16(), body));
        }

        Ok(())
    }
}
