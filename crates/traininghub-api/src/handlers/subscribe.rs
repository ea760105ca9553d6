//! Newsletter subscription handlers

use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::warn;

use traininghub_store::StoreError;

use crate::dto::{MessageResponse, SubscribeRequest};
use crate::error::{ApiError, ApiResult};
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// Subscribe an email to the newsletter
#[utoipa::path(
    post,
    path = "/api/v1/subscribe",
    tag = "Newsletter",
    request_body = SubscribeRequest,
    responses(
        (status = 200, description = "Subscribed"),
        (status = 400, description = "Already subscribed or invalid email")
    )
)]
pub async fn subscribe(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<SubscribeRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let subscriber = match state.content.create_subscriber(&request.email).await {
        Ok(subscriber) => subscriber,
        Err(StoreError::Duplicate(_)) => return Err(ApiError::AlreadySubscribed),
        Err(e) => return Err(e.into()),
    };

    // Welcome and admin notification are best-effort; the subscription is
    // already committed
    let welcome = "Thanks for subscribing to the TrainingHub newsletter!";
    if !state
        .mailer
        .send(&subscriber.email, "Welcome to TrainingHub", welcome)
        .await
    {
        warn!(subscriber_id = subscriber.id, "Welcome email dispatch failed");
    }

    let notice = format!("New newsletter subscriber: {}", subscriber.email);
    if !state
        .mailer
        .send(&state.admin_email, "New subscriber", &notice)
        .await
    {
        warn!(subscriber_id = subscriber.id, "Admin notification dispatch failed");
    }

    Ok(Json(MessageResponse {
        message: "Subscribed.".to_string(),
    }))
}

/// Unsubscribe an email from the newsletter
#[utoipa::path(
    post,
    path = "/api/v1/unsubscribe",
    tag = "Newsletter",
    request_body = SubscribeRequest,
    responses(
        (status = 200, description = "Unsubscribed"),
        (status = 404, description = "Email is not subscribed")
    )
)]
pub async fn unsubscribe(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<SubscribeRequest>,
) -> ApiResult<Json<MessageResponse>> {
    state.content.trash_subscriber(&request.email).await?;

    Ok(Json(MessageResponse {
        message: "Unsubscribed.".to_string(),
    }))
}
