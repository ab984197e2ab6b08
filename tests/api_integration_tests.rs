//! Integration Tests for the Command Endpoint
//!
//! Tests full request/response cycles through the router.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use layerkv::{api::create_router, AppState, BoxedDriver, Client, MapDriver, MemDriver};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app() -> Router {
    let client = Client::new(Box::new(MemDriver::new()) as BoxedDriver);
    create_router(AppState::new(client))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Sends one envelope and returns (status, decoded body).
async fn send(app: &Router, command: &str, key: &str, value: &[u8]) -> (StatusCode, Value) {
    let body = json!({ "command": command, "key": key, "value": value });
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

fn value_bytes(json: &Value) -> Vec<u8> {
    serde_json::from_value(json["value"].clone()).unwrap()
}

// == SET / GET ==

#[tokio::test]
async fn test_set_then_get() {
    let app = create_test_app();

    let (status, json) = send(&app, "SET", "name", b"\"layerkv\"").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["error"], "");
    assert_eq!(json["key"], "name");

    let (status, json) = send(&app, "GET", "name", b"").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value_bytes(&json), b"\"layerkv\"");
}

#[tokio::test]
async fn test_get_missing_key_reports_not_exist() {
    let app = create_test_app();

    let (status, json) = send(&app, "get", "missing", b"").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["kind"], "not_exist");
    assert!(json["error"].as_str().unwrap().contains("missing"));
}

// == ADD / DEC ==

#[tokio::test]
async fn test_add_and_dec() {
    let app = create_test_app();

    send(&app, "SET", "n", b"0").await;
    send(&app, "ADD", "n", b"5").await;
    send(&app, "DEC", "n", b"2").await;

    let (_, json) = send(&app, "GET", "n", b"").await;
    assert_eq!(value_bytes(&json), b"3");
}

#[tokio::test]
async fn test_add_on_missing_key() {
    let app = create_test_app();

    let (_, json) = send(&app, "ADD", "n", b"1").await;
    assert_eq!(json["kind"], "not_exist");
}

// == DEL ==

#[tokio::test]
async fn test_del_removes_key() {
    let app = create_test_app();

    send(&app, "SET", "k", b"1").await;
    let (_, json) = send(&app, "DEL", "k", b"").await;
    assert_eq!(json["error"], "");

    let (_, json) = send(&app, "GET", "k", b"").await;
    assert_eq!(json["kind"], "not_exist");
}

// == SETNX ==

#[tokio::test]
async fn test_setnx_conflict() {
    let app = create_test_app();

    let (_, json) = send(&app, "SETNX", "k", b"\"a\"").await;
    assert_eq!(json["error"], "");

    let (_, json) = send(&app, "SETNX", "k", b"\"b\"").await;
    assert_eq!(json["kind"], "conflict");

    let (_, json) = send(&app, "GET", "k", b"").await;
    assert_eq!(value_bytes(&json), b"\"a\"");
}

// == Error Handling ==

#[tokio::test]
async fn test_unknown_command() {
    let app = create_test_app();

    let (status, json) = send(&app, "FLUSHALL", "k", b"").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("FLUSHALL"));
}

#[tokio::test]
async fn test_invalid_json_request() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

// == Map Driver Behind The Server ==

#[tokio::test]
async fn test_map_driver_invalid_key() {
    let dir = TempDir::new().unwrap();
    let driver: BoxedDriver = Box::new(MapDriver::open(dir.path(), 16).unwrap());
    let app = create_router(AppState::new(Client::new(driver)));

    let (_, json) = send(&app, "SET", "../escape", b"1").await;
    assert_eq!(json["kind"], "invalid_key");

    let (_, json) = send(&app, "SET", "fine", b"1").await;
    assert_eq!(json["error"], "");
    assert!(dir.path().join("fine").is_file());
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "healthy");
}
