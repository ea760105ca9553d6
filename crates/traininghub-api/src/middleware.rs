//! API Middleware
//!
//! Identity resolution runs on every request: a valid bearer token puts a
//! [`CurrentUser`] into the request extensions, anything else leaves the
//! request anonymous. Handlers that require authentication reject via the
//! extractor; resolution itself never fails a request.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::extractors::CurrentUser;
use crate::state::AppState;

/// Resolve the request's bearer token, if any, into a [`CurrentUser`].
pub async fn identity_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Response {
    if let Some(token) = request_token(&req) {
        if let Some(user_id) = state.auth.resolve(&token) {
            req.extensions_mut().insert(CurrentUser { user_id });
        }
    }

    next.run(req).await
}

/// `Authorization: Bearer <token>` first, `?token=` query fallback second.
fn request_token(req: &Request) -> Option<String> {
    let header_token = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());

    header_token.or_else(|| {
        req.uri().query().and_then(|query| {
            query.split('&').find_map(|pair| {
                pair.strip_prefix("token=")
                    .map(str::to_string)
                    .filter(|t| !t.is_empty())
            })
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn req(uri: &str, auth: Option<&str>) -> Request {
        let mut builder = axum::http::Request::builder().uri(uri);
        if let Some(value) = auth {
            builder = builder.header("Authorization", value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_header_token_wins() {
        let r = req("/api/v1/account/profile?token=query-token", Some("Bearer header-token"));
        assert_eq!(request_token(&r).as_deref(), Some("header-token"));
    }

    #[test]
    fn test_query_fallback() {
        let r = req("/api/v1/account/profile?foo=bar&token=abc.def.ghi", None);
        assert_eq!(request_token(&r).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_non_bearer_header_ignored() {
        let r = req("/api/v1/account/profile", Some("Basic dXNlcjpwYXNz"));
        assert_eq!(request_token(&r), None);
    }

    #[test]
    fn test_anonymous_request() {
        let r = req("/api/v1/pages/home", None);
        assert_eq!(request_token(&r), None);
    }
}
