//! Content, newsletter and lead endpoint tests.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::json;

use common::*;
use traininghub_store::MenuItemRecord;

fn menu_item(id: i64, title: &str, order: i32, parent: Option<i64>) -> MenuItemRecord {
    MenuItemRecord {
        id,
        menu_id: 0, // set by seed_menu
        title: title.to_string(),
        url: format!("/{}", title.to_lowercase()),
        target: None,
        menu_order: order,
        parent_id: parent,
    }
}

#[tokio::test]
async fn page_fields_pass_through_unmodified() {
    let app = test_app();
    app.store
        .seed_page("home", json!({ "hero": { "title": "Learn", "cta": "/signup" } }))
        .await;

    let (status, body) = json_request(&app.router, "GET", "/api/v1/pages/home", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hero"]["title"], "Learn");

    let (status, body) = json_request(&app.router, "GET", "/api/v1/pages/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn menu_tree_is_assembled_with_depth_limit() {
    let app = test_app();
    app.store
        .seed_menu(
            "Header",
            "header-menu",
            Some("primary"),
            vec![
                menu_item(10, "Home", 1, None),
                menu_item(11, "Courses", 2, None),
                menu_item(12, "Yoga", 1, Some(11)),
                menu_item(13, "Advanced", 1, Some(12)),
            ],
        )
        .await;

    // Lookup by theme location
    let (status, body) = json_request(&app.router, "GET", "/api/v1/menus/primary", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["slug"], "header-menu");
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1]["children"][0]["title"], "Yoga");
    assert_eq!(items[1]["children"][0]["children"][0]["title"], "Advanced");

    // Depth limit prunes the tree
    let (_, body) = json_request(&app.router, "GET", "/api/v1/menus/primary?depth=2", None).await;
    let items = body["items"].as_array().unwrap();
    assert!(items[1]["children"][0]["children"].as_array().unwrap().is_empty());

    let (status, _) = json_request(&app.router, "GET", "/api/v1/menus/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn entries_are_listed_newest_first() {
    let app = test_app();
    let now = Utc::now();
    app.store
        .seed_entry("story", "Older", json!({}), now - Duration::days(2))
        .await;
    let newest = app.store.seed_entry("story", "Newest", json!({}), now).await;
    app.store.seed_entry("faq", "Unrelated", json!({}), now).await;

    let (status, body) = json_request(&app.router, "GET", "/api/v1/entries/story", None).await;
    assert_eq!(status, StatusCode::OK);
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["title"], "Newest");

    let (status, body) = json_request(
        &app.router,
        "GET",
        &format!("/api/v1/entries/story/{}", newest),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Newest");

    let (status, _) = json_request(&app.router, "GET", "/api/v1/entries/story/9999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn subscribe_unsubscribe_lifecycle() {
    let app = test_app();

    let (status, _) = json_request(
        &app.router,
        "POST",
        "/api/v1/subscribe",
        Some(json!({ "email": "news@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Welcome email and admin notification were dispatched
    assert!(app.mailer.last_to("news@example.com").is_some());
    assert!(app.mailer.last_to("admin@traininghub.example").is_some());

    // Duplicate subscription is a client error
    let (status, body) = json_request(
        &app.router,
        "POST",
        "/api/v1/subscribe",
        Some(json!({ "email": "news@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "ALREADY_SUBSCRIBED");

    let (status, _) = json_request(
        &app.router,
        "POST",
        "/api/v1/unsubscribe",
        Some(json!({ "email": "news@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Unsubscribing again finds nothing
    let (status, _) = json_request(
        &app.router,
        "POST",
        "/api/v1/unsubscribe",
        Some(json!({ "email": "news@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn subscribe_survives_mail_failure() {
    let app = test_app();
    app.mailer.set_fail(true);

    let (status, _) = json_request(
        &app.router,
        "POST",
        "/api/v1/subscribe",
        Some(json!({ "email": "news@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn lead_capture_stores_and_notifies() {
    let app = test_app();

    let (status, _) = json_request(
        &app.router,
        "POST",
        "/api/v1/leads",
        Some(json!({
            "name": "Sam Lee",
            "email": "sam@example.com",
            "course": "Strength 101",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(app.store.lead_count().await, 1);

    let notice = app.mailer.last_to("admin@traininghub.example").unwrap();
    assert!(notice.body.contains("Sam Lee"));
    assert!(notice.body.contains("Strength 101"));

    // Invalid email never reaches the store
    let (status, _) = json_request(
        &app.router,
        "POST",
        "/api/v1/leads",
        Some(json!({ "name": "X", "email": "not-an-email" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.store.lead_count().await, 1);
}

#[tokio::test]
async fn health_endpoint_is_public() {
    let app = test_app();
    let (status, body) = json_request(&app.router, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
