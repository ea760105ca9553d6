//! Content entry handlers

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::dto::{EntryDetail, EntrySummary};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Published entries of a content kind, newest first
#[utoipa::path(
    get,
    path = "/api/v1/entries/{kind}",
    tag = "Content",
    params(("kind" = String, Path, description = "Content kind, e.g. story, faq, course")),
    responses(
        (status = 200, description = "Entries", body = [EntrySummary])
    )
)]
pub async fn list_entries(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
) -> ApiResult<Json<Vec<EntrySummary>>> {
    let entries = state.content.entries(&kind).await?;
    Ok(Json(entries.iter().map(EntrySummary::from).collect()))
}

/// A single published entry
#[utoipa::path(
    get,
    path = "/api/v1/entries/{kind}/{id}",
    tag = "Content",
    params(
        ("kind" = String, Path, description = "Content kind"),
        ("id" = i64, Path, description = "Entry id")
    ),
    responses(
        (status = 200, description = "Entry", body = EntryDetail),
        (status = 404, description = "No such entry")
    )
)]
pub async fn get_entry(
    State(state): State<Arc<AppState>>,
    Path((kind, id)): Path<(String, i64)>,
) -> ApiResult<Json<EntryDetail>> {
    let entry = state
        .content
        .entry(&kind, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("{} {}", kind, id)))?;

    Ok(Json(EntryDetail::from(&entry)))
}
