//! Record models crossing the storage boundary

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Identity records
// ============================================================================

/// A stored identity. Owned by the credential store; the core reads it and
/// mutates it only through [`crate::UserStore`] methods.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    /// Unique, case-normalized (stored lower-cased).
    pub email: String,
    pub username: String,
    /// Opaque to the core; produced and checked by the password hasher.
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub display_name: String,
    pub email_verified: bool,
    /// One-way hash of the active verification code, if any.
    pub verification_code_hash: Option<String>,
    pub verification_code_expires_at: Option<DateTime<Utc>>,
    /// Free-form attributes (phone, company, settings, ...).
    pub attributes: HashMap<String, String>,
    pub created_at: DateTime<Utc>,
}

/// Fields required to create an identity.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub attributes: HashMap<String, String>,
}

/// Partial profile update; `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub phone: Option<String>,
}

// ============================================================================
// Content records
// ============================================================================

/// A navigation menu.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuRecord {
    pub id: i64,
    pub name: String,
    pub slug: String,
    /// Theme location the menu is assigned to, if any.
    pub location: Option<String>,
}

/// A flat menu item; hierarchy is expressed through `parent_id` and
/// assembled by the API layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemRecord {
    pub id: i64,
    pub menu_id: i64,
    pub title: String,
    pub url: String,
    pub target: Option<String>,
    pub menu_order: i32,
    pub parent_id: Option<i64>,
}

/// A published content entry (success story, FAQ, course, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryRecord {
    pub id: i64,
    pub kind: String,
    pub title: String,
    pub excerpt: Option<String>,
    pub body: Option<String>,
    pub image: Option<String>,
    /// Arbitrary custom fields, passed through to clients as-is.
    pub fields: serde_json::Value,
    pub published_at: DateTime<Utc>,
}

// ============================================================================
// Newsletter & leads
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriberStatus {
    Active,
    Trashed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriberRecord {
    pub id: i64,
    pub email: String,
    pub status: SubscriberStatus,
    pub created_at: DateTime<Utc>,
}

/// A lead-capture form submission.
#[derive(Debug, Clone)]
pub struct NewLead {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub course: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadRecord {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub course: Option<String>,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}
