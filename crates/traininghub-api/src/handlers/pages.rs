//! Marketing page handler

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;
use std::sync::Arc;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Stored field group for a marketing page. The API performs no
/// interpretation of the fields; they ship to the client as stored.
#[utoipa::path(
    get,
    path = "/api/v1/pages/{slug}",
    tag = "Content",
    params(("slug" = String, Path, description = "Page slug")),
    responses(
        (status = 200, description = "Page field group"),
        (status = 404, description = "No such page")
    )
)]
pub async fn get_page(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> ApiResult<Json<Value>> {
    let fields = state
        .content
        .page_fields(&slug)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Page '{}'", slug)))?;

    Ok(Json(fields))
}
