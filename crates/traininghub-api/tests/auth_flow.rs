//! End-to-end authentication flow tests over the real router.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::*;

#[tokio::test]
async fn register_then_login_requires_verification() {
    let app = test_app();
    let code = register(&app, "jane@example.com").await;

    // Login is blocked until the email is verified
    let (status, body) = json_request(
        &app.router,
        "POST",
        "/api/v1/auth/login",
        Some(json!({ "email": "jane@example.com", "password": "Str0ng!Pass" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["needsVerification"], true);
    assert_eq!(body["email"], "jane@example.com");

    // A wrong code is rejected
    let wrong = if code == "000000" { "000001" } else { "000000" };
    let (status, _) = json_request(
        &app.router,
        "POST",
        "/api/v1/auth/verify-email",
        Some(json!({ "email": "jane@example.com", "code": wrong })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // The correct code verifies the account
    let (status, body) = json_request(
        &app.router,
        "POST",
        "/api/v1/auth/verify-email",
        Some(json!({ "email": "jane@example.com", "code": code })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isVerified"], true);

    // Login now succeeds and the token resolves back to the same user
    let (status, login) = json_request(
        &app.router,
        "POST",
        "/api/v1/auth/login",
        Some(json!({ "email": "jane@example.com", "password": "Str0ng!Pass" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = login["token"].as_str().unwrap();

    let (status, me) = json_request(
        &app.router,
        "POST",
        "/api/v1/auth/verify",
        Some(json!({ "token": token })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["id"], login["user"]["id"]);
}

#[tokio::test]
async fn duplicate_registration_is_rejected() {
    let app = test_app();
    register(&app, "jane@example.com").await;

    let (status, body) = json_request(
        &app.router,
        "POST",
        "/api/v1/auth/register",
        Some(json!({
            "email": "JANE@example.com",
            "password": "Str0ng!Pass",
            "firstName": "Jane",
            "lastName": "Doe",
            "phone": "+15550100",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "EMAIL_EXISTS");
}

#[tokio::test]
async fn weak_password_lists_every_violation() {
    let app = test_app();

    let (status, body) = json_request(
        &app.router,
        "POST",
        "/api/v1/auth/register",
        Some(json!({
            "email": "jane@example.com",
            "password": "abc",
            "firstName": "Jane",
            "lastName": "Doe",
            "phone": "+15550100",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "WEAK_PASSWORD");
    // Short, no uppercase, no digit, no symbol
    assert_eq!(body["details"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn refresh_rotates_the_token() {
    let app = test_app();
    let token = verified_login(&app, "jane@example.com").await;

    let (status, body) = json_request(
        &app.router,
        "POST",
        "/api/v1/auth/refresh",
        Some(json!({ "token": token })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].as_str().is_some());
    assert_eq!(body["user"]["email"], "jane@example.com");

    // Garbage tokens are rejected
    let (status, _) = json_request(
        &app.router,
        "POST",
        "/api/v1/auth/refresh",
        Some(json!({ "token": "not.a.token" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_email_is_not_found_on_verification_endpoints() {
    let app = test_app();

    let (status, body) = json_request(
        &app.router,
        "POST",
        "/api/v1/auth/resend-verification",
        Some(json!({ "email": "ghost@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "USER_NOT_FOUND");
    assert!(app.mailer.sent().is_empty());

    let (status, body) = json_request(
        &app.router,
        "POST",
        "/api/v1/auth/verify-email",
        Some(json!({ "email": "ghost@example.com", "code": "123456" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "USER_NOT_FOUND");
}

#[tokio::test]
async fn registration_requires_a_phone_number() {
    let app = test_app();

    // Missing entirely
    let (status, _) = json_request(
        &app.router,
        "POST",
        "/api/v1/auth/register",
        Some(json!({
            "email": "jane@example.com",
            "password": "Str0ng!Pass",
            "firstName": "Jane",
            "lastName": "Doe",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Present but empty
    let (status, _) = json_request(
        &app.router,
        "POST",
        "/api/v1/auth/register",
        Some(json!({
            "email": "jane@example.com",
            "password": "Str0ng!Pass",
            "firstName": "Jane",
            "lastName": "Doe",
            "phone": "",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn registration_persists_profile_fields() {
    let app = test_app();

    let (status, _) = json_request(
        &app.router,
        "POST",
        "/api/v1/auth/register",
        Some(json!({
            "email": "jane@example.com",
            "password": "Str0ng!Pass",
            "firstName": "Jane",
            "lastName": "Doe",
            "phone": "+15550100",
            "company": "Acme Gym",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let code = mailed_code(&app, "jane@example.com");
    let (status, _) = json_request(
        &app.router,
        "POST",
        "/api/v1/auth/verify-email",
        Some(json!({ "email": "jane@example.com", "code": code })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, login) = json_request(
        &app.router,
        "POST",
        "/api/v1/auth/login",
        Some(json!({ "email": "jane@example.com", "password": "Str0ng!Pass" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = login["token"].as_str().unwrap();

    let (status, profile) = authed_request(
        &app.router,
        "GET",
        "/api/v1/account/profile",
        None,
        token,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["phone"], "+15550100");

    let (status, settings) = authed_request(
        &app.router,
        "GET",
        "/api/v1/account/settings",
        None,
        token,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(settings["settings"]["company"], "Acme Gym");
}

#[tokio::test]
async fn bearer_header_and_query_token_both_resolve() {
    let app = test_app();
    let token = verified_login(&app, "jane@example.com").await;

    // Authorization header
    let (status, profile) = authed_request(
        &app.router,
        "GET",
        "/api/v1/account/profile",
        None,
        &token,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["email"], "jane@example.com");

    // Query fallback
    let (status, profile) = json_request(
        &app.router,
        "GET",
        &format!("/api/v1/account/profile?token={}", token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["email"], "jane@example.com");

    // Anonymous request is rejected at the gate
    let (status, body) = json_request(&app.router, "GET", "/api/v1/account/profile", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn profile_and_settings_round_trip() {
    let app = test_app();
    let token = verified_login(&app, "jane@example.com").await;

    let (status, profile) = authed_request(
        &app.router,
        "POST",
        "/api/v1/account/profile",
        Some(json!({ "firstName": "Janet", "bio": "Trainer" })),
        &token,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["firstName"], "Janet");
    assert_eq!(profile["lastName"], "Doe");
    assert_eq!(profile["bio"], "Trainer");

    let (status, settings) = authed_request(
        &app.router,
        "POST",
        "/api/v1/account/settings",
        Some(json!({ "settings": { "newsletter": "weekly" } })),
        &token,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(settings["settings"]["newsletter"], "weekly");
}

#[tokio::test]
async fn change_password_keeps_the_weaker_length_rule() {
    let app = test_app();
    let token = verified_login(&app, "jane@example.com").await;

    // 6 characters passes the change rule even though registration would
    // reject it
    let (status, _) = authed_request(
        &app.router,
        "POST",
        "/api/v1/account/change-password",
        Some(json!({
            "currentPassword": "Str0ng!Pass",
            "newPassword": "simple",
            "confirmPassword": "simple",
        })),
        &token,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = json_request(
        &app.router,
        "POST",
        "/api/v1/auth/login",
        Some(json!({ "email": "jane@example.com", "password": "simple" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn delete_account_invalidates_identity() {
    let app = test_app();
    let token = verified_login(&app, "jane@example.com").await;

    let (status, _) = authed_request(
        &app.router,
        "POST",
        "/api/v1/account/delete",
        Some(json!({ "password": "Str0ng!Pass" })),
        &token,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // The token still decodes but no longer maps to an account
    let (status, _) = authed_request(
        &app.router,
        "GET",
        "/api/v1/account/profile",
        None,
        &token,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
