//! Authentication configuration
//!
//! Centralized configuration for the token codec, password policy and
//! verification engine. Defaults match the documented API contract; the
//! signing secret has no default and must come from the environment.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main authentication configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Token codec configuration
    pub token: TokenConfig,
    /// Password policy
    pub password: PasswordPolicy,
    /// Email verification configuration
    pub verification: VerificationConfig,
}

/// Bearer token configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenConfig {
    /// HMAC-SHA256 signing secret. Must be set in production; an empty
    /// secret fails validation at startup.
    pub secret: String,
    /// Issuer claim, normally the public site URL.
    pub issuer: String,
    /// Token lifetime
    #[serde(with = "duration_secs")]
    pub token_lifetime: Duration,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            issuer: "https://traininghub.example".to_string(),
            token_lifetime: Duration::from_secs(30 * 24 * 60 * 60), // 30 days
        }
    }
}

/// Password policy
///
/// Registration enforces the full character-class policy. Password changes
/// keep the historical, weaker length-only rule so existing accounts with
/// short passwords can still rotate them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordPolicy {
    /// Minimum length at registration
    pub min_length: usize,
    /// Minimum length for password changes
    pub change_min_length: usize,
    pub require_uppercase: bool,
    pub require_lowercase: bool,
    pub require_digit: bool,
    pub require_symbol: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            change_min_length: 6,
            require_uppercase: true,
            require_lowercase: true,
            require_digit: true,
            require_symbol: true,
        }
    }
}

/// Email verification configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationConfig {
    /// How long a verification code stays valid
    #[serde(with = "duration_secs")]
    pub code_ttl: Duration,
    /// Sender shown in verification emails
    pub mail_from: String,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_ttl: Duration::from_secs(60 * 60), // 1 hour
            mail_from: "TrainingHub <no-reply@traininghub.example>".to_string(),
        }
    }
}

impl AuthConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(secret) = std::env::var("AUTH_TOKEN_SECRET") {
            config.token.secret = secret;
        }
        if let Ok(issuer) = std::env::var("AUTH_TOKEN_ISSUER") {
            config.token.issuer = issuer;
        }
        if let Ok(from) = std::env::var("AUTH_MAIL_FROM") {
            config.verification.mail_from = from;
        }

        config
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.token.secret.is_empty() {
            errors.push("Token secret must be set".to_string());
        } else if self.token.secret.len() < 32 {
            errors.push("Token secret should be at least 256 bits (32 bytes)".to_string());
        }

        if self.token.token_lifetime.as_secs() == 0 {
            errors.push("Token lifetime must be non-zero".to_string());
        }

        if self.verification.code_ttl.as_secs() == 0 {
            errors.push("Verification code TTL must be non-zero".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_secs(u64::deserialize(d)?))
    }
}
