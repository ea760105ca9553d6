//! Authentication Handlers
//!
//! Registration, login, token refresh/introspection and email verification.

use axum::{extract::State, Json};
use std::sync::Arc;

use traininghub_auth::service::Registration;
use traininghub_auth::IdentitySummary;

use crate::dto::{
    LoginRequest, MessageResponse, RegisterRequest, RegisterResponse, ResendVerificationRequest,
    TokenRequest, TokenResponse, VerifyEmailRequest,
};
use crate::error::ApiResult;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created, verification email sent", body = RegisterResponse),
        (status = 400, description = "Invalid email, weak password or email already registered")
    )
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<(axum::http::StatusCode, Json<RegisterResponse>)> {
    let outcome = state
        .auth
        .register(Registration {
            email: request.email,
            password: request.password,
            first_name: request.first_name,
            last_name: request.last_name,
            phone: request.phone,
            company: request.company,
            position: request.position,
            government: request.government,
        })
        .await?;

    Ok((
        axum::http::StatusCode::CREATED,
        Json(RegisterResponse {
            user: outcome.identity,
            mail_sent: outcome.mail_sent,
            message: "Account created. Check your email for a verification code.".to_string(),
        }),
    ))
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 403, description = "Email not verified; body carries needsVerification")
    )
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let outcome = state.auth.login(&request.email, &request.password).await?;

    Ok(Json(TokenResponse {
        token: outcome.token,
        user: outcome.identity,
    }))
}

/// Exchange a valid token for a fresh one
#[utoipa::path(
    post,
    path = "/api/v1/auth/refresh",
    tag = "Authentication",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "New token issued", body = TokenResponse),
        (status = 401, description = "Token invalid or expired")
    )
)]
pub async fn refresh(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<TokenRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let outcome = state.auth.refresh(&request.token).await?;

    Ok(Json(TokenResponse {
        token: outcome.token,
        user: outcome.identity,
    }))
}

/// Introspect a token and return the subject's identity
#[utoipa::path(
    post,
    path = "/api/v1/auth/verify",
    tag = "Authentication",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Token is valid", body = IdentitySummary),
        (status = 401, description = "Token invalid or expired")
    )
)]
pub async fn verify_token(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<TokenRequest>,
) -> ApiResult<Json<IdentitySummary>> {
    let user_id = state
        .auth
        .resolve(&request.token)
        .ok_or(crate::error::ApiError::Unauthorized)?;
    let identity = state.auth.identity(user_id).await?;
    Ok(Json(identity))
}

/// Submit an email verification code
#[utoipa::path(
    post,
    path = "/api/v1/auth/verify-email",
    tag = "Authentication",
    request_body = VerifyEmailRequest,
    responses(
        (status = 200, description = "Email verified", body = IdentitySummary),
        (status = 400, description = "Code missing, wrong or expired"),
        (status = 404, description = "No account for this email")
    )
)]
pub async fn verify_email(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<VerifyEmailRequest>,
) -> ApiResult<Json<IdentitySummary>> {
    let identity = state.auth.verify_email(&request.email, &request.code).await?;
    Ok(Json(identity))
}

/// Resend the verification code
#[utoipa::path(
    post,
    path = "/api/v1/auth/resend-verification",
    tag = "Authentication",
    request_body = ResendVerificationRequest,
    responses(
        (status = 200, description = "Resend accepted"),
        (status = 400, description = "Email is already verified"),
        (status = 404, description = "No account for this email")
    )
)]
pub async fn resend_verification(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<ResendVerificationRequest>,
) -> ApiResult<Json<MessageResponse>> {
    state.auth.resend_verification(&request.email).await?;

    Ok(Json(MessageResponse {
        message: "A new verification code has been sent.".to_string(),
    }))
}
