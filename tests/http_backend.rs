//! `HttpBackend` against a mock HTTP server.

use httpmock::prelude::*;
use serde_json::json;
use vestibule::backend::{BackendApi, NewUser};
use vestibule::{
    BootstrapOutcome, HttpBackend, InMemorySnapshotStore, MockNavigator, MockSessionProvider,
    Plan, Route, Session, SessionError, SessionManager, StatsSource, VestibuleConfig,
};

fn new_user() -> NewUser {
    NewUser {
        user_id: "u1".to_owned(),
        email: "u1@example.com".to_owned(),
        name: "U One".to_owned(),
    }
}

#[tokio::test]
async fn fetch_profile_parses_mixed_casing() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/users/u1");
        then.status(200).json_body(json!({
            "current_plan": "free",
            "currentPlan": "unlimited",
            "credits": 99999,
            "questions_marked": 7
        }));
    });

    let backend = HttpBackend::new(server.base_url());
    let record = backend.fetch_profile("u1").await.unwrap();

    // camelCase wins when both spellings are present
    assert_eq!(record.plan(), Some("unlimited"));
    assert_eq!(record.credits(), Some(99_999));
    assert_eq!(record.questions_marked(), Some(7));
}

#[tokio::test]
async fn missing_email_signature_is_distinguished() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/users/u1");
        then.status(400)
            .json_body(json!({"detail": "Missing email information"}));
    });

    let backend = HttpBackend::new(server.base_url());
    let err = backend.fetch_profile("u1").await.unwrap_err();

    assert_eq!(err, SessionError::MissingEmail);
}

#[tokio::test]
async fn other_errors_carry_the_status() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/users/u1");
        then.status(500).body("server error");
    });

    let backend = HttpBackend::new(server.base_url());
    match backend.fetch_profile("u1").await.unwrap_err() {
        SessionError::HttpStatus(status, _) => assert_eq!(status, 500),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn ensure_user_tolerates_conflicts() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/users").json_body(json!({
            "user_id": "u1",
            "email": "u1@example.com",
            "name": "U One"
        }));
        then.status(409).body("already exists");
    });

    let backend = HttpBackend::new(server.base_url());
    assert!(backend.ensure_user(&new_user()).await.is_ok());
    mock.assert();
}

#[tokio::test]
async fn ensure_user_surfaces_missing_email() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/users");
        then.status(400).body("missing email information");
    });

    let backend = HttpBackend::new(server.base_url());
    let err = backend.ensure_user(&new_user()).await.unwrap_err();
    assert_eq!(err, SessionError::MissingEmail);
}

#[tokio::test]
async fn update_academic_level_puts_the_level() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(PUT)
            .path("/users/u1")
            .json_body(json!({"academic_level": "gcse"}));
        then.status(200);
    });

    let backend = HttpBackend::new(server.base_url());
    backend.update_academic_level("u1", "gcse").await.unwrap();
    mock.assert();
}

#[tokio::test]
async fn bootstrap_through_real_http() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/users");
        then.status(201);
    });
    server.mock(|when, then| {
        when.method(GET).path("/users/u1");
        then.status(200).json_body(json!({
            "current_plan": "unlimited",
            "credits": 99999,
            "questions_marked": 42
        }));
    });

    let manager = SessionManager::new(
        MockSessionProvider::signed_in(Session::mock_with_id("u1")),
        HttpBackend::new(server.base_url()),
        InMemorySnapshotStore::new(),
        MockNavigator::at(Route::Dashboard),
        VestibuleConfig::default(),
    );

    let outcome = manager.bootstrap().await;
    assert_eq!(outcome, BootstrapOutcome::Resolved(StatsSource::Network));

    let stats = manager.state().stats().unwrap();
    assert_eq!(stats.current_plan, Plan::Unlimited);
    assert_eq!(stats.credits, 99_999);
    assert_eq!(stats.questions_marked, 42);
    assert_eq!(stats.academic_level, "N/A");
}
