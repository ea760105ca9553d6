//! Authentication error types
//!
//! Errors are designed to be:
//! - Informative for logging/debugging
//! - Safe for external exposure (no sensitive data leakage)
//! - Convertible to HTTP status codes

use serde::{Deserialize, Serialize};
use thiserror::Error;

use traininghub_store::StoreError;

/// Result type alias for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication error types
#[derive(Debug, Error)]
pub enum AuthError {
    // =========================================================================
    // Token Errors
    // =========================================================================
    /// Token has expired
    #[error("Token has expired")]
    TokenExpired,

    /// Token is invalid (malformed, wrong signature, unknown algorithm)
    #[error("Invalid token")]
    InvalidToken,

    // =========================================================================
    // Credential Errors
    // =========================================================================
    /// Wrong email or password. Deliberately coarse so callers cannot tell
    /// which of the two was wrong.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Login attempted before the email was verified. Carries the email so
    /// clients can offer a resend without re-asking for it.
    #[error("Email address has not been verified")]
    EmailNotVerified { email: String },

    /// Registration with an email that already has an account
    #[error("An account with this email already exists")]
    EmailExists,

    /// Email failed the shape check
    #[error("Invalid email address")]
    InvalidEmail,

    // =========================================================================
    // Password Errors
    // =========================================================================
    /// Password failed one or more policy rules; all violations are listed
    #[error("Password does not meet requirements")]
    WeakPassword(Vec<String>),

    /// New password and its confirmation differ
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// Password hashing failed
    #[error("Password hashing failed")]
    PasswordHashingFailed,

    // =========================================================================
    // Verification Errors
    // =========================================================================
    /// Submitted code is missing, wrong or expired
    #[error("Invalid or expired verification code")]
    InvalidVerificationCode,

    /// Email is already verified
    #[error("Email is already verified")]
    AlreadyVerified,

    // =========================================================================
    // User State Errors
    // =========================================================================
    /// User not found
    #[error("User not found")]
    UserNotFound,

    /// Caller is not authenticated
    #[error("Authentication required")]
    Unauthenticated,

    // =========================================================================
    // Internal Errors
    // =========================================================================
    /// Storage error
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Internal error (never exposed to clients)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request
            Self::EmailExists
            | Self::InvalidEmail
            | Self::WeakPassword(_)
            | Self::PasswordMismatch
            | Self::InvalidVerificationCode
            | Self::AlreadyVerified => 400,

            // 401 Unauthorized
            Self::TokenExpired
            | Self::InvalidToken
            | Self::InvalidCredentials
            | Self::Unauthenticated => 401,

            // 403 Forbidden
            Self::EmailNotVerified { .. } => 403,

            // 404 Not Found
            Self::UserNotFound => 404,

            // 500 Internal Server Error
            Self::PasswordHashingFailed | Self::Store(_) | Self::Internal(_) => 500,
        }
    }

    /// Get an error code for the client (safe to expose)
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::EmailNotVerified { .. } => "EMAIL_NOT_VERIFIED",
            Self::EmailExists => "EMAIL_EXISTS",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::WeakPassword(_) => "WEAK_PASSWORD",
            Self::PasswordMismatch => "PASSWORD_MISMATCH",
            Self::InvalidVerificationCode => "INVALID_VERIFICATION_CODE",
            Self::AlreadyVerified => "ALREADY_VERIFIED",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::PasswordHashingFailed | Self::Store(_) | Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this error should be logged at error level
    pub fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    /// Get safe message for client (doesn't leak internal details)
    pub fn client_message(&self) -> String {
        match self {
            Self::PasswordHashingFailed | Self::Store(_) | Self::Internal(_) => {
                "An internal error occurred".to_string()
            }
            _ => self.to_string(),
        }
    }
}

/// Error response for API clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (machine-readable)
    pub code: String,
    /// Error message (human-readable)
    pub message: String,
    /// Individual policy violations, for weak-password errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl From<&AuthError> for ErrorResponse {
    fn from(error: &AuthError) -> Self {
        let details = match error {
            AuthError::WeakPassword(violations) => Some(violations.clone()),
            _ => None,
        };

        Self {
            code: error.error_code().to_string(),
            message: error.client_message(),
            details,
        }
    }
}

impl From<argon2::password_hash::Error> for AuthError {
    fn from(_: argon2::password_hash::Error) -> Self {
        Self::PasswordHashingFailed
    }
}
