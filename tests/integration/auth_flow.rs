//! Integration tests for the authentication lifecycle.
//!
//! Drives the real `ApiClient` against the in-process backend stub:
//! register → login → logout, failure messages, and the implicit-expiry
//! classification on task endpoints.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod support;

use std::time::Duration;

use punchcard::api::{ApiClient, ApiError};
use support::StubServer;

const TIMEOUT: Duration = Duration::from_secs(5);

fn client_for(server: &StubServer) -> ApiClient {
    ApiClient::new(&server.base_url(), TIMEOUT).unwrap()
}

#[tokio::test]
async fn register_login_fetch_logout_round_trip() {
    let server = StubServer::spawn().await;
    let client = client_for(&server);

    client
        .register("alice", "alice@example.com", "hunter2")
        .await
        .unwrap();

    let resp = client.login("alice", "hunter2").await.unwrap();
    assert_eq!(resp.username, "alice");

    let tasks = client.fetch_tasks().await.unwrap();
    assert!(tasks.is_empty());

    client.logout().await.unwrap();

    // The session cookie is dead server-side; task calls now classify as
    // expiry.
    let err = client.fetch_tasks().await.unwrap_err();
    assert!(matches!(err, ApiError::AuthExpired));
}

#[tokio::test]
async fn login_with_bad_password_surfaces_server_message() {
    let server = StubServer::spawn_with_user("alice", "hunter2").await;
    let client = client_for(&server);

    let err = client.login("alice", "wrong").await.unwrap_err();
    match err {
        ApiError::Rejected { message, .. } => assert_eq!(message, "Invalid credentials"),
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn login_with_unknown_user_is_rejected_not_expired() {
    let server = StubServer::spawn().await;
    let client = client_for(&server);

    // A 401 from the login endpoint is bad credentials, never a session
    // expiry.
    let err = client.login("nobody", "whatever").await.unwrap_err();
    assert!(matches!(err, ApiError::Rejected { .. }));
}

#[tokio::test]
async fn duplicate_registration_is_rejected() {
    let server = StubServer::spawn_with_user("alice", "hunter2").await;
    let client = client_for(&server);

    let err = client
        .register("alice", "alice@example.com", "other")
        .await
        .unwrap_err();
    match err {
        ApiError::Rejected { message, .. } => assert_eq!(message, "User already exists"),
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn registration_does_not_authenticate() {
    let server = StubServer::spawn().await;
    let client = client_for(&server);

    client
        .register("alice", "alice@example.com", "hunter2")
        .await
        .unwrap();

    let err = client.fetch_tasks().await.unwrap_err();
    assert!(matches!(err, ApiError::AuthExpired));
}

#[tokio::test]
async fn server_side_expiry_classifies_on_every_task_endpoint() {
    let server = StubServer::spawn_with_user("alice", "hunter2").await;
    let client = client_for(&server);
    client.login("alice", "hunter2").await.unwrap();

    let task = client.create_task("Write spec").await.unwrap();

    server.expire_sessions();

    assert!(matches!(
        client.fetch_tasks().await.unwrap_err(),
        ApiError::AuthExpired
    ));
    assert!(matches!(
        client.create_task("Another").await.unwrap_err(),
        ApiError::AuthExpired
    ));
    assert!(matches!(
        client.toggle_task(task.id).await.unwrap_err(),
        ApiError::AuthExpired
    ));
    assert!(matches!(
        client.complete_task(task.id).await.unwrap_err(),
        ApiError::AuthExpired
    ));
    assert!(matches!(
        client.delete_task(task.id).await.unwrap_err(),
        ApiError::AuthExpired
    ));
}

#[tokio::test]
async fn relogin_after_expiry_restores_access() {
    let server = StubServer::spawn_with_user("alice", "hunter2").await;
    let client = client_for(&server);

    client.login("alice", "hunter2").await.unwrap();
    server.expire_sessions();
    assert!(client.fetch_tasks().await.is_err());

    client.login("alice", "hunter2").await.unwrap();
    assert!(client.fetch_tasks().await.is_ok());
}
