//! Content, subscription and lead DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use traininghub_store::{EntryRecord, MenuRecord};

/// Menu listing entry
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MenuSummary {
    pub id: i64,
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl From<&MenuRecord> for MenuSummary {
    fn from(menu: &MenuRecord) -> Self {
        Self {
            id: menu.id,
            name: menu.name.clone(),
            slug: menu.slug.clone(),
            location: menu.location.clone(),
        }
    }
}

/// A menu with its items assembled into a tree
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MenuTreeResponse {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub items: Vec<MenuTreeItem>,
}

/// One node of a menu tree
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MenuTreeItem {
    pub id: i64,
    pub title: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    pub children: Vec<MenuTreeItem>,
}

/// Optional query parameters for menu tree assembly
#[derive(Debug, Deserialize)]
pub struct MenuTreeQuery {
    /// Maximum tree depth; deeper items are dropped
    pub depth: Option<usize>,
}

/// Content entry in a listing (body omitted)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntrySummary {
    pub id: i64,
    pub kind: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub fields: serde_json::Value,
    pub published_at: DateTime<Utc>,
}

impl From<&EntryRecord> for EntrySummary {
    fn from(entry: &EntryRecord) -> Self {
        Self {
            id: entry.id,
            kind: entry.kind.clone(),
            title: entry.title.clone(),
            excerpt: entry.excerpt.clone(),
            image: entry.image.clone(),
            fields: entry.fields.clone(),
            published_at: entry.published_at,
        }
    }
}

/// Full content entry
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntryDetail {
    pub id: i64,
    pub kind: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub fields: serde_json::Value,
    pub published_at: DateTime<Utc>,
}

impl From<&EntryRecord> for EntryDetail {
    fn from(entry: &EntryRecord) -> Self {
        Self {
            id: entry.id,
            kind: entry.kind.clone(),
            title: entry.title.clone(),
            excerpt: entry.excerpt.clone(),
            body: entry.body.clone(),
            image: entry.image.clone(),
            fields: entry.fields.clone(),
            published_at: entry.published_at,
        }
    }
}

/// Newsletter subscription request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SubscribeRequest {
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
}

/// Lead capture form submission
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LeadRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    pub phone: Option<String>,
    pub course: Option<String>,
    pub message: Option<String>,
}
