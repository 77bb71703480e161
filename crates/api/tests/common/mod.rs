#![allow(dead_code)]

use std::sync::Arc;

use arcade_api::config::ServerConfig;
use arcade_api::router::build_app_router;
use arcade_api::state::AppState;
use arcade_core::clock::ManualClock;
use arcade_core::lease::EditPolicy;
use arcade_core::types::Timestamp;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::DateTime;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

/// 2026-01-01T00:00:00Z, the instant every test clock starts at.
pub fn t0() -> Timestamp {
    DateTime::from_timestamp(1_767_225_600, 0).unwrap()
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        ..ServerConfig::default()
    }
}

/// Application under test plus the clock driving it.
pub struct TestApp {
    pub router: Router,
    pub clock: Arc<ManualClock>,
}

impl TestApp {
    /// A fresh handle on the router (each request consumes one).
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    pub fn advance_secs(&self, secs: i64) {
        self.clock.advance_secs(secs);
    }
}

/// Full application router over `pool` with a manual clock at [`t0`].
pub fn build_test_app(pool: PgPool) -> TestApp {
    build_test_app_with_config(pool, test_config())
}

pub fn build_strict_test_app(pool: PgPool) -> TestApp {
    build_test_app_with_config(
        pool,
        ServerConfig {
            edit_policy: EditPolicy::Strict,
            ..test_config()
        },
    )
}

pub fn build_test_app_with_config(pool: PgPool, config: ServerConfig) -> TestApp {
    let clock = Arc::new(ManualClock::new(t0()));
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        clock: clock.clone(),
    };
    TestApp {
        router: build_app_router(state, &config),
        clock,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    user: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header("x-user-id", user);
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_as(app: Router, uri: &str, user: &str, body: Option<Value>) -> Response<Body> {
    send(app, Method::POST, uri, Some(user), body).await
}

pub async fn put_json_as(app: Router, uri: &str, user: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(user), Some(body)).await
}

pub async fn delete_as(app: Router, uri: &str, user: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(user), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Parse an RFC 3339 timestamp field out of a JSON body.
pub fn timestamp(value: &Value) -> Timestamp {
    serde_json::from_value(value.clone()).unwrap()
}

/// Create a game through the API and return its id.
pub async fn create_game(app: Router, name: &str) -> i64 {
    let response = post_json(app, "/api/v1/games", serde_json::json!({ "name": name })).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}
