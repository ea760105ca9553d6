//! Password Service
//!
//! Argon2id hashing plus the two policy checks the platform applies:
//! the full character-class policy at registration, and the weaker
//! length-only rule for password changes.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use zeroize::Zeroizing;

use crate::config::PasswordPolicy;
use crate::error::{AuthError, AuthResult};

/// Password service for hashing, verification and policy checks
#[derive(Clone)]
pub struct PasswordService {
    policy: PasswordPolicy,
}

impl PasswordService {
    pub fn new(policy: PasswordPolicy) -> Self {
        Self { policy }
    }

    /// Hash a password using Argon2id with a fresh random salt.
    pub fn hash(&self, password: &str) -> AuthResult<String> {
        let password = Zeroizing::new(password.to_string());
        let salt = SaltString::generate(&mut OsRng);

        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|_| AuthError::PasswordHashingFailed)?;

        Ok(hash.to_string())
    }

    /// Verify a password against a stored hash.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let password = Zeroizing::new(password.to_string());
        let Ok(parsed) = PasswordHash::new(hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    /// Registration policy check. All violated rules are reported, not just
    /// the first, so clients can show the complete list.
    pub fn validate_registration(&self, password: &str) -> AuthResult<()> {
        let mut violations = Vec::new();

        if password.chars().count() < self.policy.min_length {
            violations.push(format!(
                "Password must be at least {} characters",
                self.policy.min_length
            ));
        }
        if self.policy.require_uppercase && !password.chars().any(|c| c.is_uppercase()) {
            violations.push("Password must contain at least one uppercase letter".to_string());
        }
        if self.policy.require_lowercase && !password.chars().any(|c| c.is_lowercase()) {
            violations.push("Password must contain at least one lowercase letter".to_string());
        }
        if self.policy.require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
            violations.push("Password must contain at least one digit".to_string());
        }
        if self.policy.require_symbol && !password.chars().any(|c| !c.is_alphanumeric()) {
            violations.push("Password must contain at least one symbol".to_string());
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(AuthError::WeakPassword(violations))
        }
    }

    /// Change-password policy check. Historical rule: length only.
    pub fn validate_change(&self, password: &str) -> AuthResult<()> {
        if password.chars().count() < self.policy.change_min_length {
            return Err(AuthError::WeakPassword(vec![format!(
                "Password must be at least {} characters",
                self.policy.change_min_length
            )]));
        }
        Ok(())
    }
}
