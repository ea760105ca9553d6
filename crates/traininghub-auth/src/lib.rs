//! TrainingHub Authentication Core
//!
//! Symmetric-key authentication for the platform API:
//! - [`token::TokenCodec`]: compact HS256 bearer tokens (issue, decode, refresh)
//! - [`verification::VerificationEngine`]: one-time email verification codes
//! - [`password::PasswordService`]: Argon2id hashing and policy checks
//! - [`service::AuthService`]: orchestration over the storage boundary
//!
//! The codec is self-contained: a token carries everything needed to
//! authenticate a request, nothing is stored server-side and nothing can be
//! revoked before expiry. Keep lifetimes in [`config::TokenConfig`] in line
//! with that trade-off.

pub mod config;
pub mod error;
pub mod password;
pub mod service;
pub mod token;
pub mod types;
pub mod verification;

pub use config::{AuthConfig, PasswordPolicy, TokenConfig, VerificationConfig};
pub use error::{AuthError, AuthResult};
pub use password::PasswordService;
pub use service::{AuthService, LoginOutcome, RegisterOutcome};
pub use token::{Claims, TokenCodec};
pub use types::IdentitySummary;
pub use verification::{CodeSubmission, VerificationEngine};
