//! API Routes

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::handlers;
use crate::middleware::identity_middleware;
use crate::state::AppState;

/// Create API v1 routes. Identity resolution runs on every route; only the
/// account routes require it to have produced a user.
pub fn api_v1_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/account", account_routes())
        // Content pass-through (public)
        .route("/pages/:slug", get(handlers::pages::get_page))
        .route("/menus", get(handlers::menus::list_menus))
        .route("/menus/:slug", get(handlers::menus::get_menu_tree))
        .route("/entries/:kind", get(handlers::entries::list_entries))
        .route("/entries/:kind/:id", get(handlers::entries::get_entry))
        // Newsletter & leads (public)
        .route("/subscribe", post(handlers::subscribe::subscribe))
        .route("/unsubscribe", post(handlers::subscribe::unsubscribe))
        .route("/leads", post(handlers::leads::create_lead))
        .layer(from_fn_with_state(state, identity_middleware))
}

/// Authentication routes
fn auth_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/refresh", post(handlers::auth::refresh))
        .route("/verify", post(handlers::auth::verify_token))
        .route("/verify-email", post(handlers::auth::verify_email))
        .route(
            "/resend-verification",
            post(handlers::auth::resend_verification),
        )
}

/// Account routes (bearer gate enforced by the CurrentUser extractor)
fn account_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/profile", get(handlers::account::get_profile))
        .route("/profile", post(handlers::account::update_profile))
        .route("/change-password", post(handlers::account::change_password))
        .route("/settings", get(handlers::account::get_settings))
        .route("/settings", post(handlers::account::update_settings))
        .route("/delete", post(handlers::account::delete_account))
}

/// Create Swagger UI routes
pub fn swagger_routes() -> Router<Arc<AppState>> {
    use crate::openapi::ApiDoc;
    use utoipa::OpenApi;
    use utoipa_swagger_ui::SwaggerUi;

    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
