//! Application state shared across handlers

use std::sync::Arc;

use traininghub_auth::AuthService;
use traininghub_store::{ContentStore, Mailer, UserStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Authentication orchestrator
    pub auth: Arc<AuthService>,
    /// Credential store, for profile and settings handlers
    pub users: Arc<dyn UserStore>,
    /// Content store
    pub content: Arc<dyn ContentStore>,
    /// Outbound email, for subscription and lead notifications
    pub mailer: Arc<dyn Mailer>,
    /// Recipient for admin notifications
    pub admin_email: String,
}

impl AppState {
    pub fn new(
        auth: Arc<AuthService>,
        users: Arc<dyn UserStore>,
        content: Arc<dyn ContentStore>,
        mailer: Arc<dyn Mailer>,
        admin_email: String,
    ) -> Self {
        Self {
            auth,
            users,
            content,
            mailer,
            admin_email,
        }
    }
}
