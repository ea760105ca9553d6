//! Collaborator traits consumed by the core

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::StoreResult;
use crate::models::{
    EntryRecord, LeadRecord, MenuItemRecord, MenuRecord, NewLead, NewUser, ProfileChanges,
    SubscriberRecord, UserRecord,
};

/// Credential store boundary.
///
/// Emails are compared case-insensitively; implementations store them
/// lower-cased and must enforce uniqueness atomically at creation time.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Create an identity. Fails with [`crate::StoreError::Duplicate`] when
    /// the email is already taken.
    async fn create(&self, new: NewUser) -> StoreResult<UserRecord>;

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<UserRecord>>;

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<UserRecord>>;

    async fn username_exists(&self, username: &str) -> StoreResult<bool>;

    /// Apply a partial profile update and return the updated record.
    async fn update_profile(&self, id: i64, changes: ProfileChanges) -> StoreResult<UserRecord>;

    /// Merge the given attributes into the identity's attribute map.
    async fn update_attributes(
        &self,
        id: i64,
        attributes: Vec<(String, String)>,
    ) -> StoreResult<()>;

    async fn set_password(&self, id: i64, password_hash: &str) -> StoreResult<()>;

    /// Store a verification code hash and expiry, replacing any prior code.
    async fn set_verification_code(
        &self,
        id: i64,
        code_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> StoreResult<()>;

    /// Flip `email_verified` to true and clear the stored code + expiry in a
    /// single atomic step (the code is single-use).
    async fn mark_email_verified(&self, id: i64) -> StoreResult<()>;

    /// Immediate, irreversible deletion of the identity record.
    async fn delete(&self, id: i64) -> StoreResult<()>;
}

/// Content store boundary. Read-mostly pass-through; the core performs no
/// interpretation of page field groups beyond shipping them to clients.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Stored field group for a marketing page, if the page exists.
    async fn page_fields(&self, slug: &str) -> StoreResult<Option<serde_json::Value>>;

    async fn menus(&self) -> StoreResult<Vec<MenuRecord>>;

    /// Look a menu up by theme location first, then by slug.
    async fn menu_by_slug(&self, slug: &str) -> StoreResult<Option<MenuRecord>>;

    /// Flat item list for a menu, sorted by `menu_order`.
    async fn menu_items(&self, menu_id: i64) -> StoreResult<Vec<MenuItemRecord>>;

    /// Published entries of a kind, newest first.
    async fn entries(&self, kind: &str) -> StoreResult<Vec<EntryRecord>>;

    async fn entry(&self, kind: &str, id: i64) -> StoreResult<Option<EntryRecord>>;

    /// Active (non-trashed) subscriber with the given email, if any.
    async fn find_subscriber(&self, email: &str) -> StoreResult<Option<SubscriberRecord>>;

    /// Create a subscriber record; fails with
    /// [`crate::StoreError::Duplicate`] when an active record exists.
    async fn create_subscriber(&self, email: &str) -> StoreResult<SubscriberRecord>;

    /// Move an active subscriber to the trashed status.
    async fn trash_subscriber(&self, email: &str) -> StoreResult<()>;

    async fn create_lead(&self, lead: NewLead) -> StoreResult<LeadRecord>;
}

/// Outbound email dispatch. Returns whether the dispatch succeeded; callers
/// treat failure as non-fatal and must never roll back committed state
/// because of it.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> bool;
}

/// Time source, injected so token and code expiry are testable.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
