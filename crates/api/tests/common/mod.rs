#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use beautyboss_api::auth::jwt::JwtConfig;
use beautyboss_api::booking_sessions::BookingSessions;
use beautyboss_api::config::{ServerConfig, StorageBackend};
use beautyboss_api::router::build_app_router;
use beautyboss_api::state::AppState;
use beautyboss_db::MemoryStore;
use beautyboss_events::EventBus;

/// Build a test `ServerConfig` with safe defaults and in-memory storage.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        storage: StorageBackend::Memory,
        database_url: None,
        booking_session_ttl_secs: 1800,
        max_booking_sessions: 100,
        public_booking_base_url: "beautyscheduler.com".to_string(),
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// A fresh in-memory application plus the state behind it, so tests can
/// subscribe to the event bus or poke the store directly.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    /// A clone of the router, ready for one `oneshot` request.
    pub fn app(&self) -> Router {
        self.router.clone()
    }
}

/// Build the full application router with all middleware layers on top of
/// an empty [`MemoryStore`].
pub fn build_test_app() -> TestApp {
    build_test_app_with(test_config())
}

/// Same as [`build_test_app`] with a caller-tuned configuration.
pub fn build_test_app_with(config: ServerConfig) -> TestApp {
    let state = AppState {
        store: Arc::new(MemoryStore::new()),
        config: Arc::new(config.clone()),
        event_bus: Arc::new(EventBus::default()),
        booking_sessions: Arc::new(BookingSessions::new(
            Duration::from_secs(config.booking_session_ttl_secs),
            config.max_booking_sessions,
        )),
    };
    TestApp {
        router: build_app_router(state.clone(), &config),
        state,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
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

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, None, Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub const TEST_PASSWORD: &str = "senha-segura-123";

/// Sign up `name` with an email derived from it and return the access token.
pub async fn signup_and_token(test: &TestApp, name: &str) -> String {
    let email = format!("{}@example.com", name.to_lowercase().replace(' ', "."));
    let response = post_json(
        test.app(),
        "/api/v1/auth/signup",
        serde_json::json!({
            "name": name,
            "email": email,
            "whatsapp": "11999998888",
            "password": TEST_PASSWORD,
        }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    let json = body_json(response).await;
    json["data"]["access_token"].as_str().unwrap().to_string()
}

/// Run the onboarding wizard for a hair salon with one extra professional
/// and save it.
pub async fn onboard_hair_salon(test: &TestApp, token: &str) {
    let steps = [
        (Method::PUT, "/api/v1/onboarding/business-type", serde_json::json!({ "business_type": "hair_salon" })),
        (Method::POST, "/api/v1/onboarding/professionals", serde_json::json!({ "name": "Bruno Lima" })),
        (Method::POST, "/api/v1/onboarding/services/defaults", serde_json::json!({})),
        (Method::PUT, "/api/v1/onboarding/plan", serde_json::json!({ "plan_id": "pro" })),
        (Method::POST, "/api/v1/onboarding/save", serde_json::json!({})),
    ];
    for (method, uri, body) in steps {
        let response = send(test.app(), method, uri, Some(token), Some(body)).await;
        assert_eq!(response.status(), axum::http::StatusCode::OK, "{uri}");
    }
}
