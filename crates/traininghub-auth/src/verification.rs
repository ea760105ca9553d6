//! Email Verification Engine
//!
//! One-time six-digit codes gating login. Codes are drawn uniformly from
//! 000000..=999999, stored only as SHA-256 hex digests with an expiry, and
//! are single-use: accepting a code clears it. Regenerating replaces any
//! code still outstanding. Expiry is checked lazily at submission; nothing
//! sweeps expired codes in the background.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::config::VerificationConfig;
use crate::error::{AuthError, AuthResult};

/// Outcome of submitting a verification code. Deliberately binary: callers
/// learn nothing about whether a code was wrong, expired or never issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeSubmission {
    Accepted,
    Rejected,
}

/// A freshly issued code, ready to be stored and mailed.
#[derive(Debug)]
pub struct IssuedCode {
    /// The plaintext code, for the email only. Never stored.
    pub code: String,
    /// SHA-256 hex digest to persist.
    pub code_hash: String,
    pub expires_at: DateTime<Utc>,
}

/// Stateless verification code engine
#[derive(Clone)]
pub struct VerificationEngine {
    config: VerificationConfig,
}

impl VerificationEngine {
    pub fn new(config: VerificationConfig) -> Self {
        Self { config }
    }

    /// Draw a fresh code and compute what to store for it.
    pub fn issue(&self, now: DateTime<Utc>) -> AuthResult<IssuedCode> {
        let ttl = Duration::from_std(self.config.code_ttl)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let code = format!("{:06}", rand::thread_rng().gen_range(0..=999_999u32));
        let code_hash = hash_code(&code);

        Ok(IssuedCode {
            code,
            code_hash,
            expires_at: now + ttl,
        })
    }

    /// Check a submitted code against the stored digest and expiry.
    ///
    /// `stored` is whatever the credential store holds for the user; `None`
    /// means no code is outstanding. A code whose expiry equals `now` is
    /// still accepted.
    pub fn submit(
        &self,
        stored: Option<(&str, DateTime<Utc>)>,
        submitted: &str,
        now: DateTime<Utc>,
    ) -> CodeSubmission {
        let Some((stored_hash, expires_at)) = stored else {
            return CodeSubmission::Rejected;
        };

        if now > expires_at {
            return CodeSubmission::Rejected;
        }

        let submitted_hash = hash_code(submitted.trim());
        if submitted_hash
            .as_bytes()
            .ct_eq(stored_hash.as_bytes())
            .unwrap_u8()
            == 1
        {
            CodeSubmission::Accepted
        } else {
            CodeSubmission::Rejected
        }
    }

    /// Verification email body for a freshly issued code.
    pub fn email_body(&self, first_name: &str, code: &str) -> String {
        format!(
            "Hi {},\n\n\
             Your TrainingHub verification code is: {}\n\n\
             The code expires in {} minutes. If you did not request it, you \
             can ignore this email.\n",
            first_name,
            code,
            self.config.code_ttl.as_secs() / 60
        )
    }

    pub fn mail_from(&self) -> &str {
        &self.config.mail_from
    }
}

/// SHA-256 hex digest of a code.
pub fn hash_code(code: &str) -> String {
    hex::encode(Sha256::digest(code.as_bytes()))
}
