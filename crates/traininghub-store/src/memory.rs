//! In-memory reference implementation of the storage boundary
//!
//! Backs the server binary in development and the test suites. All state
//! lives behind a single `RwLock`; every mutating operation holds the write
//! lock from check to commit, which gives the atomic check-then-create and
//! read-modify-write semantics the core depends on.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::models::{
    EntryRecord, LeadRecord, MenuItemRecord, MenuRecord, NewLead, NewUser, ProfileChanges,
    SubscriberRecord, SubscriberStatus, UserRecord,
};
use crate::traits::{Clock, ContentStore, Mailer, UserStore};

#[derive(Default)]
struct Inner {
    users: HashMap<i64, UserRecord>,
    pages: HashMap<String, serde_json::Value>,
    menus: Vec<MenuRecord>,
    menu_items: Vec<MenuItemRecord>,
    entries: Vec<EntryRecord>,
    subscribers: Vec<SubscriberRecord>,
    leads: Vec<LeadRecord>,
    next_user_id: i64,
    next_record_id: i64,
}

impl Inner {
    fn next_user_id(&mut self) -> i64 {
        self.next_user_id += 1;
        self.next_user_id
    }

    fn next_record_id(&mut self) -> i64 {
        self.next_record_id += 1;
        self.next_record_id
    }
}

/// In-memory store implementing both [`UserStore`] and [`ContentStore`].
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a marketing page's field group.
    pub async fn seed_page(&self, slug: &str, fields: serde_json::Value) {
        let mut inner = self.inner.write().await;
        inner.pages.insert(slug.to_string(), fields);
    }

    /// Seed a menu with its flat item list; returns the menu id.
    pub async fn seed_menu(
        &self,
        name: &str,
        slug: &str,
        location: Option<&str>,
        items: Vec<MenuItemRecord>,
    ) -> i64 {
        let mut inner = self.inner.write().await;
        let id = inner.next_record_id();
        inner.menus.push(MenuRecord {
            id,
            name: name.to_string(),
            slug: slug.to_string(),
            location: location.map(str::to_string),
        });
        for mut item in items {
            item.menu_id = id;
            inner.menu_items.push(item);
        }
        id
    }

    /// Seed a content entry; returns its id.
    pub async fn seed_entry(
        &self,
        kind: &str,
        title: &str,
        fields: serde_json::Value,
        published_at: DateTime<Utc>,
    ) -> i64 {
        let mut inner = self.inner.write().await;
        let id = inner.next_record_id();
        inner.entries.push(EntryRecord {
            id,
            kind: kind.to_string(),
            title: title.to_string(),
            excerpt: None,
            body: None,
            image: None,
            fields,
            published_at,
        });
        id
    }

    pub async fn lead_count(&self) -> usize {
        self.inner.read().await.leads.len()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(&self, new: NewUser) -> StoreResult<UserRecord> {
        let mut inner = self.inner.write().await;
        let email = new.email.to_lowercase();

        if inner.users.values().any(|u| u.email == email) {
            return Err(StoreError::Duplicate(format!(
                "Email {} already exists",
                email
            )));
        }

        let id = inner.next_user_id();
        let display_name = format!("{} {}", new.first_name, new.last_name);
        let user = UserRecord {
            id,
            email,
            username: new.username,
            password_hash: new.password_hash,
            first_name: new.first_name,
            last_name: new.last_name,
            display_name,
            email_verified: false,
            verification_code_hash: None,
            verification_code_expires_at: None,
            attributes: new.attributes,
            created_at: Utc::now(),
        };
        inner.users.insert(id, user.clone());

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<UserRecord>> {
        let email = email.to_lowercase();
        let inner = self.inner.read().await;
        Ok(inner.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<UserRecord>> {
        let inner = self.inner.read().await;
        Ok(inner.users.get(&id).cloned())
    }

    async fn username_exists(&self, username: &str) -> StoreResult<bool> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().any(|u| u.username == username))
    }

    async fn update_profile(&self, id: i64, changes: ProfileChanges) -> StoreResult<UserRecord> {
        let mut inner = self.inner.write().await;
        let user = inner
            .users
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("User {}", id)))?;

        if let Some(first_name) = changes.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = changes.last_name {
            user.last_name = last_name;
        }
        if let Some(display_name) = changes.display_name {
            user.display_name = display_name;
        }
        if let Some(bio) = changes.bio {
            user.attributes.insert("bio".to_string(), bio);
        }
        if let Some(phone) = changes.phone {
            user.attributes.insert("phone".to_string(), phone);
        }

        Ok(user.clone())
    }

    async fn update_attributes(
        &self,
        id: i64,
        attributes: Vec<(String, String)>,
    ) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        let user = inner
            .users
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("User {}", id)))?;
        user.attributes.extend(attributes);
        Ok(())
    }

    async fn set_password(&self, id: i64, password_hash: &str) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        let user = inner
            .users
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("User {}", id)))?;
        user.password_hash = password_hash.to_string();
        Ok(())
    }

    async fn set_verification_code(
        &self,
        id: i64,
        code_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        let user = inner
            .users
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("User {}", id)))?;
        user.verification_code_hash = Some(code_hash.to_string());
        user.verification_code_expires_at = Some(expires_at);
        Ok(())
    }

    async fn mark_email_verified(&self, id: i64) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        let user = inner
            .users
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("User {}", id)))?;
        user.email_verified = true;
        user.verification_code_hash = None;
        user.verification_code_expires_at = None;
        Ok(())
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        inner
            .users
            .remove(&id)
            .ok_or_else(|| StoreError::NotFound(format!("User {}", id)))?;
        Ok(())
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn page_fields(&self, slug: &str) -> StoreResult<Option<serde_json::Value>> {
        let inner = self.inner.read().await;
        Ok(inner.pages.get(slug).cloned())
    }

    async fn menus(&self) -> StoreResult<Vec<MenuRecord>> {
        let inner = self.inner.read().await;
        Ok(inner.menus.clone())
    }

    async fn menu_by_slug(&self, slug: &str) -> StoreResult<Option<MenuRecord>> {
        let inner = self.inner.read().await;
        let by_location = inner
            .menus
            .iter()
            .find(|m| m.location.as_deref() == Some(slug));
        let menu = by_location.or_else(|| inner.menus.iter().find(|m| m.slug == slug));
        Ok(menu.cloned())
    }

    async fn menu_items(&self, menu_id: i64) -> StoreResult<Vec<MenuItemRecord>> {
        let inner = self.inner.read().await;
        let mut items: Vec<MenuItemRecord> = inner
            .menu_items
            .iter()
            .filter(|i| i.menu_id == menu_id)
            .cloned()
            .collect();
        items.sort_by_key(|i| i.menu_order);
        Ok(items)
    }

    async fn entries(&self, kind: &str) -> StoreResult<Vec<EntryRecord>> {
        let inner = self.inner.read().await;
        let mut entries: Vec<EntryRecord> = inner
            .entries
            .iter()
            .filter(|e| e.kind == kind)
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(entries)
    }

    async fn entry(&self, kind: &str, id: i64) -> StoreResult<Option<EntryRecord>> {
        let inner = self.inner.read().await;
        Ok(inner
            .entries
            .iter()
            .find(|e| e.kind == kind && e.id == id)
            .cloned())
    }

    async fn find_subscriber(&self, email: &str) -> StoreResult<Option<SubscriberRecord>> {
        let email = email.to_lowercase();
        let inner = self.inner.read().await;
        Ok(inner
            .subscribers
            .iter()
            .find(|s| s.email == email && s.status == SubscriberStatus::Active)
            .cloned())
    }

    async fn create_subscriber(&self, email: &str) -> StoreResult<SubscriberRecord> {
        let mut inner = self.inner.write().await;
        let email = email.to_lowercase();

        if inner
            .subscribers
            .iter()
            .any(|s| s.email == email && s.status == SubscriberStatus::Active)
        {
            return Err(StoreError::Duplicate(format!(
                "Subscriber {} already exists",
                email
            )));
        }

        let id = inner.next_record_id();
        let subscriber = SubscriberRecord {
            id,
            email,
            status: SubscriberStatus::Active,
            created_at: Utc::now(),
        };
        inner.subscribers.push(subscriber.clone());

        Ok(subscriber)
    }

    async fn trash_subscriber(&self, email: &str) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        let email = email.to_lowercase();
        let subscriber = inner
            .subscribers
            .iter_mut()
            .find(|s| s.email == email && s.status == SubscriberStatus::Active)
            .ok_or_else(|| StoreError::NotFound(format!("Subscriber {}", email)))?;
        subscriber.status = SubscriberStatus::Trashed;
        Ok(())
    }

    async fn create_lead(&self, lead: NewLead) -> StoreResult<LeadRecord> {
        let mut inner = self.inner.write().await;
        let id = inner.next_record_id();
        let record = LeadRecord {
            id,
            name: lead.name,
            email: lead.email,
            phone: lead.phone,
            course: lead.course,
            message: lead.message,
            created_at: Utc::now(),
        };
        inner.leads.push(record.clone());
        Ok(record)
    }
}

// ============================================================================
// Mailers
// ============================================================================

/// Mailer that logs instead of delivering. Default for development.
#[derive(Debug, Default, Clone)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, _body: &str) -> bool {
        tracing::info!(to = %to, subject = %subject, "Email dispatched (log mailer)");
        true
    }
}

/// A sent email captured by [`CapturingMailer`].
#[derive(Debug, Clone)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Mailer that records every send; tests read the codes out of the bodies.
/// Flip `fail` to simulate dispatch failure.
#[derive(Debug, Default)]
pub struct CapturingMailer {
    sent: Mutex<Vec<SentMail>>,
    fail: Mutex<bool>,
}

impl CapturingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last_to(&self, to: &str) -> Option<SentMail> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|m| m.to == to)
            .cloned()
    }

    pub fn set_fail(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }
}

#[async_trait]
impl Mailer for CapturingMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> bool {
        let fail = *self.fail.lock().unwrap();
        self.sent.lock().unwrap().push(SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        !fail
    }
}

// ============================================================================
// Clock
// ============================================================================

/// Wall-clock time source.
#[derive(Debug, Default, Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
