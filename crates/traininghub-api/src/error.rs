//! API error handling
//!
//! Translates core errors into JSON responses. The body always carries a
//! machine-readable `code` and a safe `message`; weak-password errors add a
//! `details` list, and the unverified-email login failure adds
//! `needsVerification` plus the email so clients can jump straight to the
//! verification screen.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use traininghub_auth::AuthError;
use traininghub_store::StoreError;

/// API result type
pub type ApiResult<T> = Result<T, ApiError>;

/// API error
#[derive(Debug, Error)]
pub enum ApiError {
    /// Error from the authentication core
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Authentication required")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("This email is already subscribed")]
    AlreadySubscribed,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get the HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Auth(err) => {
                StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) | Self::Validation(_) | Self::AlreadySubscribed => {
                StatusCode::BAD_REQUEST
            }
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get a machine-readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Auth(err) => err.error_code(),
            Self::Unauthorized => "UNAUTHENTICATED",
            Self::NotFound(_) => "NOT_FOUND",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::AlreadySubscribed => "ALREADY_SUBSCRIBED",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::Auth(err) => err.client_message(),
            Self::Internal(_) => "An internal error occurred".to_string(),
            _ => self.to_string(),
        }
    }
}

/// API error response body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Error code (machine-readable)
    pub code: String,
    /// Error message (human-readable)
    pub message: String,
    /// Individual policy violations, for weak-password errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
    /// Set on login failures caused by an unverified email
    #[serde(skip_serializing_if = "Option::is_none")]
    pub needs_verification: Option<bool>,
    /// The email that needs verification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl From<&ApiError> for ErrorBody {
    fn from(err: &ApiError) -> Self {
        let mut body = Self {
            code: err.error_code().to_string(),
            message: err.client_message(),
            details: None,
            needs_verification: None,
            email: None,
        };

        match err {
            ApiError::Auth(AuthError::WeakPassword(violations)) => {
                body.details = Some(violations.clone());
            }
            ApiError::Auth(AuthError::EmailNotVerified { email }) => {
                body.needs_verification = Some(true);
                body.email = Some(email.clone());
            }
            _ => {}
        }

        body
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Auth(ref err) = self {
            if err.is_server_error() {
                tracing::error!(error = %err, "Auth operation failed");
            }
        }
        if let ApiError::Internal(ref msg) = self {
            tracing::error!(error = %msg, "Internal error");
        }

        let status = self.status_code();
        (status, Json(ErrorBody::from(&self))).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(what) => Self::NotFound(what),
            StoreError::Duplicate(_) => Self::AlreadySubscribed,
            other => {
                tracing::error!(error = %other, "Store error");
                Self::Internal(other.to_string())
            }
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        let messages: Vec<String> = err
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| {
                    format!(
                        "{}: {}",
                        field,
                        e.message.as_ref().map(|m| m.as_ref()).unwrap_or("invalid")
                    )
                })
            })
            .collect();
        Self::Validation(messages.join(", "))
    }
}
