//! Lead capture handler

use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::{info, warn};

use traininghub_store::NewLead;

use crate::dto::{LeadRequest, MessageResponse};
use crate::error::ApiResult;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// Store a lead-capture form submission and notify the admin
#[utoipa::path(
    post,
    path = "/api/v1/leads",
    tag = "Leads",
    request_body = LeadRequest,
    responses(
        (status = 201, description = "Lead stored"),
        (status = 400, description = "Invalid submission")
    )
)]
pub async fn create_lead(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<LeadRequest>,
) -> ApiResult<(axum::http::StatusCode, Json<MessageResponse>)> {
    let lead = state
        .content
        .create_lead(NewLead {
            name: request.name,
            email: request.email,
            phone: request.phone,
            course: request.course,
            message: request.message,
        })
        .await?;

    info!(lead_id = lead.id, "Lead captured");

    let notice = format!(
        "New lead from {} <{}>{}",
        lead.name,
        lead.email,
        lead.course
            .as_deref()
            .map(|c| format!(", interested in {}", c))
            .unwrap_or_default()
    );
    if !state
        .mailer
        .send(&state.admin_email, "New course enquiry", &notice)
        .await
    {
        warn!(lead_id = lead.id, "Admin notification dispatch failed");
    }

    Ok((
        axum::http::StatusCode::CREATED,
        Json(MessageResponse {
            message: "Thanks, we will be in touch shortly.".to_string(),
        }),
    ))
}
