//! Shared identity types

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use utoipa::ToSchema;

use traininghub_store::UserRecord;

/// Client-facing identity summary, returned by login, refresh and
/// registration alongside the token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IdentitySummary {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_verified: bool,
    /// Gravatar-style avatar URL derived from the email
    pub avatar: String,
}

impl IdentitySummary {
    pub fn from_record(user: &UserRecord) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            is_verified: user.email_verified,
            avatar: avatar_url(&user.email),
        }
    }
}

/// Avatar URL from the SHA-256 digest of the normalized email.
pub fn avatar_url(email: &str) -> String {
    let digest = Sha256::digest(email.trim().to_lowercase().as_bytes());
    format!("https://gravatar.com/avatar/{}?d=mp", hex::encode(digest))
}
