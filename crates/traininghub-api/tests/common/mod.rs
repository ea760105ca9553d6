//! Shared test harness: a real router over the in-memory store.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use traininghub_api::{create_test_router, AppState};
use traininghub_auth::{AuthConfig, AuthService};
use traininghub_store::{CapturingMailer, MemoryStore, SystemClock};

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub mailer: Arc<CapturingMailer>,
}

pub fn test_app() -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let mailer = Arc::new(CapturingMailer::new());
    let clock = Arc::new(SystemClock);

    let mut auth_config = AuthConfig::default();
    auth_config.token.secret = "test-secret-key-at-least-32-bytes-long!!".to_string();

    let auth = Arc::new(AuthService::new(
        auth_config,
        store.clone(),
        mailer.clone(),
        clock,
    ));

    let state = Arc::new(AppState::new(
        auth,
        store.clone(),
        store.clone(),
        mailer.clone(),
        "admin@traininghub.example".to_string(),
    ));

    TestApp {
        router: create_test_router(state),
        store,
        mailer,
    }
}

/// Make a request and get the JSON response
pub async fn json_request(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    request_with_auth(router, method, uri, body, None).await
}

/// Make a request with a bearer token
pub async fn authed_request(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    token: &str,
) -> (StatusCode, Value) {
    request_with_auth(router, method, uri, body, Some(token)).await
}

async fn request_with_auth(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> (StatusCode, Value) {
    let mut request = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");

    if let Some(token) = token {
        request = request.header("Authorization", format!("Bearer {}", token));
    }

    let body = if let Some(json_body) = body {
        Body::from(serde_json::to_vec(&json_body).unwrap())
    } else {
        Body::empty()
    };

    let response = router.clone().oneshot(request.body(body).unwrap()).await.unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap_or(json!(null));

    (status, json)
}

/// Register an account and return the verification code from the captured
/// email.
pub async fn register(app: &TestApp, email: &str) -> String {
    let (status, _) = json_request(
        &app.router,
        "POST",
        "/api/v1/auth/register",
        Some(json!({
            "email": email,
            "password": "Str0ng!Pass",
            "firstName": "Jane",
            "lastName": "Doe",
            "phone": "+15550100",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    mailed_code(app, email)
}

/// Pull the 6-digit code out of the last email sent to `to`.
pub fn mailed_code(app: &TestApp, to: &str) -> String {
    let mail = app.mailer.last_to(to).expect("verification email");
    mail.body
        .split_whitespace()
        .find(|w| w.len() == 6 && w.chars().all(|c| c.is_ascii_digit()))
        .expect("code in body")
        .to_string()
}

/// Register, verify and log in; returns the bearer token.
pub async fn verified_login(app: &TestApp, email: &str) -> String {
    let code = register(app, email).await;

    let (status, _) = json_request(
        &app.router,
        "POST",
        "/api/v1/auth/verify-email",
        Some(json!({ "email": email, "code": code })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = json_request(
        &app.router,
        "POST",
        "/api/v1/auth/login",
        Some(json!({ "email": email, "password": "Str0ng!Pass" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    body["token"].as_str().unwrap().to_string()
}
