//! Auth Service
//!
//! Orchestrates the token codec, password service and verification engine
//! over the storage boundary. All account flows live here; the API layer
//! only translates HTTP to these calls.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use traininghub_store::{Clock, Mailer, NewUser, StoreError, UserRecord, UserStore};

use crate::config::AuthConfig;
use crate::error::{AuthError, AuthResult};
use crate::password::PasswordService;
use crate::token::TokenCodec;
use crate::types::IdentitySummary;
use crate::verification::{CodeSubmission, VerificationEngine};

/// Registration input
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    /// Contact number, required at registration.
    pub phone: String,
    pub company: Option<String>,
    pub position: Option<String>,
    pub government: Option<String>,
}

/// Result of a successful registration. No token is issued; the account
/// cannot log in until the email is verified.
#[derive(Debug)]
pub struct RegisterOutcome {
    pub identity: IdentitySummary,
    /// Whether the verification email was dispatched. Mail failure does not
    /// fail registration; the client can ask for a resend.
    pub mail_sent: bool,
}

/// Result of a successful login or refresh
#[derive(Debug)]
pub struct LoginOutcome {
    pub token: String,
    pub identity: IdentitySummary,
}

/// Authentication orchestrator
pub struct AuthService {
    users: Arc<dyn UserStore>,
    mailer: Arc<dyn Mailer>,
    clock: Arc<dyn Clock>,
    tokens: TokenCodec,
    passwords: PasswordService,
    verification: VerificationEngine,
}

impl AuthService {
    pub fn new(
        config: AuthConfig,
        users: Arc<dyn UserStore>,
        mailer: Arc<dyn Mailer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            mailer,
            clock,
            tokens: TokenCodec::new(config.token),
            passwords: PasswordService::new(config.password),
            verification: VerificationEngine::new(config.verification),
        }
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Register a new account.
    ///
    /// The account starts unverified; a verification code is stored and
    /// mailed. The username is derived from the email's local part, with a
    /// numeric suffix appended until it is unique. The phone number and any
    /// optional profile fields land in the identity's attribute map.
    pub async fn register(&self, reg: Registration) -> AuthResult<RegisterOutcome> {
        let email = reg.email.trim().to_lowercase();
        if !is_valid_email(&email) {
            return Err(AuthError::InvalidEmail);
        }

        self.passwords.validate_registration(&reg.password)?;

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailExists);
        }

        let username = self.unique_username(&email).await?;
        let password_hash = self.passwords.hash(&reg.password)?;

        let mut attributes = HashMap::new();
        attributes.insert("phone".to_string(), reg.phone.trim().to_string());
        for (key, value) in [
            ("company", reg.company),
            ("position", reg.position),
            ("government", reg.government),
        ] {
            if let Some(value) = value {
                let value = value.trim();
                if !value.is_empty() {
                    attributes.insert(key.to_string(), value.to_string());
                }
            }
        }

        let user = match self
            .users
            .create(NewUser {
                email: email.clone(),
                username,
                password_hash,
                first_name: reg.first_name.trim().to_string(),
                last_name: reg.last_name.trim().to_string(),
                attributes,
            })
            .await
        {
            Ok(user) => user,
            // Lost a race with a concurrent registration for the same email
            Err(StoreError::Duplicate(_)) => return Err(AuthError::EmailExists),
            Err(e) => return Err(e.into()),
        };

        info!(user_id = user.id, "Account registered");

        let mail_sent = self.issue_and_mail_code(&user).await?;

        Ok(RegisterOutcome {
            identity: IdentitySummary::from_record(&user),
            mail_sent,
        })
    }

    // =========================================================================
    // Login & tokens
    // =========================================================================

    /// Authenticate with email and password and issue a token.
    ///
    /// Wrong email and wrong password are indistinguishable to the caller.
    /// A correct password against an unverified email is a distinct failure
    /// so clients can route the user to the verification screen.
    pub async fn login(&self, email: &str, password: &str) -> AuthResult<LoginOutcome> {
        let email = email.trim().to_lowercase();
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.passwords.verify(password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        if !user.email_verified {
            return Err(AuthError::EmailNotVerified { email: user.email });
        }

        let token = self.tokens.issue(user.id, self.clock.now())?;
        debug!(user_id = user.id, "Login succeeded");

        Ok(LoginOutcome {
            token,
            identity: IdentitySummary::from_record(&user),
        })
    }

    /// Exchange a still-valid token for a fresh one anchored at now.
    pub async fn refresh(&self, token: &str) -> AuthResult<LoginOutcome> {
        let now = self.clock.now();
        let claims = self.tokens.decode(token, now)?;

        let user = self
            .users
            .find_by_id(claims.user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        Ok(LoginOutcome {
            token: self.tokens.issue(user.id, now)?,
            identity: IdentitySummary::from_record(&user),
        })
    }

    /// Resolve a bearer token to a user id. Returns `None` for anything
    /// invalid or expired; anonymous access is not an error.
    pub fn resolve(&self, token: &str) -> Option<i64> {
        self.tokens
            .decode(token, self.clock.now())
            .ok()
            .map(|claims| claims.user_id)
    }

    // =========================================================================
    // Email verification
    // =========================================================================

    /// Submit a verification code for an email address.
    ///
    /// On acceptance the account is marked verified and the code is cleared
    /// in one step; a second submission of the same code is rejected.
    pub async fn verify_email(&self, email: &str, code: &str) -> AuthResult<IdentitySummary> {
        let email = email.trim().to_lowercase();
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if user.email_verified {
            return Err(AuthError::AlreadyVerified);
        }

        let stored = user
            .verification_code_hash
            .as_deref()
            .zip(user.verification_code_expires_at);

        match self.verification.submit(stored, code, self.clock.now()) {
            CodeSubmission::Accepted => {
                self.users.mark_email_verified(user.id).await?;
                info!(user_id = user.id, "Email verified");
                let user = self
                    .users
                    .find_by_id(user.id)
                    .await?
                    .ok_or(AuthError::UserNotFound)?;
                Ok(IdentitySummary::from_record(&user))
            }
            CodeSubmission::Rejected => Err(AuthError::InvalidVerificationCode),
        }
    }

    /// Issue a fresh verification code, replacing any outstanding one.
    ///
    /// Unknown emails and already-verified accounts are errors. Mail failure
    /// is logged and reported as success; the user can simply ask again.
    pub async fn resend_verification(&self, email: &str) -> AuthResult<()> {
        let email = email.trim().to_lowercase();
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if user.email_verified {
            return Err(AuthError::AlreadyVerified);
        }

        self.issue_and_mail_code(&user).await?;
        Ok(())
    }

    // =========================================================================
    // Account maintenance
    // =========================================================================

    /// Change the account password. Requires re-proof of the current
    /// password; the new password only has to meet the change-time policy.
    pub async fn change_password(
        &self,
        user_id: i64,
        current: &str,
        new: &str,
        confirm: &str,
    ) -> AuthResult<()> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !self.passwords.verify(current, &user.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }
        if new != confirm {
            return Err(AuthError::PasswordMismatch);
        }
        self.passwords.validate_change(new)?;

        let hash = self.passwords.hash(new)?;
        self.users.set_password(user.id, &hash).await?;
        info!(user_id = user.id, "Password changed");

        Ok(())
    }

    /// Delete the account immediately. Requires re-proof of the password.
    /// Outstanding tokens stay decodable until expiry but resolve to a
    /// missing user from here on.
    pub async fn delete_account(&self, user_id: i64, password: &str) -> AuthResult<()> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !self.passwords.verify(password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        self.users.delete(user.id).await?;
        info!(user_id = user.id, "Account deleted");

        Ok(())
    }

    /// Identity summary for an authenticated user.
    pub async fn identity(&self, user_id: i64) -> AuthResult<IdentitySummary> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        Ok(IdentitySummary::from_record(&user))
    }

    // =========================================================================
    // Internals
    // =========================================================================

    async fn issue_and_mail_code(&self, user: &UserRecord) -> AuthResult<bool> {
        let issued = self.verification.issue(self.clock.now())?;
        self.users
            .set_verification_code(user.id, &issued.code_hash, issued.expires_at)
            .await?;

        let body = self.verification.email_body(&user.first_name, &issued.code);
        let sent = self
            .mailer
            .send(&user.email, "Verify your email address", &body)
            .await;

        if !sent {
            warn!(user_id = user.id, "Verification email dispatch failed");
        }

        Ok(sent)
    }

    async fn unique_username(&self, email: &str) -> AuthResult<String> {
        let local = email.split('@').next().unwrap_or_default();
        let base: String = local
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
            .collect();
        let base = if base.is_empty() {
            "user".to_string()
        } else {
            base
        };

        if !self.users.username_exists(&base).await? {
            return Ok(base);
        }
        for n in 1.. {
            let candidate = format!("{}{}", base, n);
            if !self.users.username_exists(&candidate).await? {
                return Ok(candidate);
            }
        }
        unreachable!()
    }
}

/// Minimal shape check: one `@`, a non-empty local part, a dotted domain,
/// no whitespace. Deliverability is the mailer's problem.
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.contains(char::is_whitespace)
        && !domain.contains('@')
}
