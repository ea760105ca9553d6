//! Menu handlers
//!
//! Menu items are stored flat with parent pointers; the tree is assembled
//! here. Assembly is depth-limited so a corrupt parent cycle cannot hang a
//! request.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;

use traininghub_store::MenuItemRecord;

use crate::dto::{MenuSummary, MenuTreeItem, MenuTreeQuery, MenuTreeResponse};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

const MAX_DEPTH: usize = 10;

/// List all menus
#[utoipa::path(
    get,
    path = "/api/v1/menus",
    tag = "Content",
    responses(
        (status = 200, description = "Menus", body = [MenuSummary])
    )
)]
pub async fn list_menus(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<MenuSummary>>> {
    let menus = state.content.menus().await?;
    Ok(Json(menus.iter().map(MenuSummary::from).collect()))
}

/// Menu item tree by theme location or slug
#[utoipa::path(
    get,
    path = "/api/v1/menus/{slug}",
    tag = "Content",
    params(
        ("slug" = String, Path, description = "Theme location or menu slug"),
        ("depth" = Option<usize>, Query, description = "Maximum tree depth")
    ),
    responses(
        (status = 200, description = "Menu tree", body = MenuTreeResponse),
        (status = 404, description = "No such menu")
    )
)]
pub async fn get_menu_tree(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Query(query): Query<MenuTreeQuery>,
) -> ApiResult<Json<MenuTreeResponse>> {
    let menu = state
        .content
        .menu_by_slug(&slug)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Menu '{}'", slug)))?;

    let items = state.content.menu_items(menu.id).await?;
    let depth = query.depth.unwrap_or(MAX_DEPTH).clamp(1, MAX_DEPTH);

    Ok(Json(MenuTreeResponse {
        id: menu.id,
        name: menu.name,
        slug: menu.slug,
        items: assemble_tree(&items, None, depth),
    }))
}

/// Recursively collect the children of `parent` from the flat item list.
/// Items are already sorted by `menu_order`; order is preserved.
fn assemble_tree(
    items: &[MenuItemRecord],
    parent: Option<i64>,
    depth_left: usize,
) -> Vec<MenuTreeItem> {
    if depth_left == 0 {
        return Vec::new();
    }

    items
        .iter()
        .filter(|item| item.parent_id == parent)
        .map(|item| MenuTreeItem {
            id: item.id,
            title: item.title.clone(),
            url: item.url.clone(),
            target: item.target.clone(),
            children: assemble_tree(items, Some(item.id), depth_left - 1),
        })
        .collect()
}
