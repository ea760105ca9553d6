//! Content seeding
//!
//! Loads pages, menus and entries from a JSON file into the in-memory store
//! at startup. The file shape mirrors what a headless CMS export looks like:
//!
//! ```json
//! {
//!   "pages": { "home": { "hero": { "title": "..." } } },
//!   "menus": [
//!     {
//!       "name": "Header", "slug": "header-menu", "location": "primary",
//!       "items": [
//!         { "id": 1, "title": "Home", "url": "/" },
//!         { "id": 2, "title": "Courses", "url": "/courses", "parent": 1 }
//!       ]
//!     }
//!   ],
//!   "entries": [
//!     { "kind": "story", "title": "...", "fields": {}, "publishedAt": "..." }
//!   ]
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use traininghub_store::{MemoryStore, MenuItemRecord};

/// Parsed seed file
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedData {
    #[serde(default)]
    pub pages: HashMap<String, Value>,
    #[serde(default)]
    pub menus: Vec<SeedMenu>,
    #[serde(default)]
    pub entries: Vec<SeedEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedMenu {
    pub name: String,
    pub slug: String,
    pub location: Option<String>,
    #[serde(default)]
    pub items: Vec<SeedMenuItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedMenuItem {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub target: Option<String>,
    #[serde(default)]
    pub order: i32,
    /// References the `id` of another item in the same menu
    pub parent: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedEntry {
    pub kind: String,
    pub title: String,
    #[serde(default)]
    pub fields: Value,
    pub published_at: Option<DateTime<Utc>>,
}

impl SeedData {
    /// Read and parse a seed file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let bytes = std::fs::read(path)
            .map_err(|e| anyhow::anyhow!("cannot read seed file {}: {}", path.display(), e))?;
        let data = serde_json::from_slice(&bytes)
            .map_err(|e| anyhow::anyhow!("malformed seed file {}: {}", path.display(), e))?;
        Ok(data)
    }

    /// Apply the seed data to a store
    pub async fn apply(self, store: &MemoryStore) {
        let page_count = self.pages.len();
        for (slug, fields) in self.pages {
            store.seed_page(&slug, fields).await;
        }

        let menu_count = self.menus.len();
        for menu in self.menus {
            let items = menu
                .items
                .into_iter()
                .map(|item| MenuItemRecord {
                    id: item.id,
                    menu_id: 0, // assigned by the store
                    title: item.title,
                    url: item.url,
                    target: item.target,
                    menu_order: item.order,
                    parent_id: item.parent,
                })
                .collect();
            store
                .seed_menu(&menu.name, &menu.slug, menu.location.as_deref(), items)
                .await;
        }

        let entry_count = self.entries.len();
        for entry in self.entries {
            store
                .seed_entry(
                    &entry.kind,
                    &entry.title,
                    entry.fields,
                    entry.published_at.unwrap_or_else(Utc::now),
                )
                .await;
        }

        tracing::info!(
            pages = page_count,
            menus = menu_count,
            entries = entry_count,
            "Content seeded"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use traininghub_store::ContentStore;

    #[tokio::test]
    async fn test_seed_round_trip() {
        let raw = serde_json::json!({
            "pages": { "home": { "hero": "Welcome" } },
            "menus": [{
                "name": "Header",
                "slug": "header-menu",
                "location": "primary",
                "items": [
                    { "id": 1, "title": "Home", "url": "/", "order": 1 },
                    { "id": 2, "title": "Yoga", "url": "/yoga", "order": 2, "parent": 1 }
                ]
            }],
            "entries": [
                { "kind": "story", "title": "First", "fields": { "body": "..." } }
            ]
        });

        let data: SeedData = serde_json::from_value(raw).unwrap();
        let store = MemoryStore::new();
        data.apply(&store).await;

        let page = store.page_fields("home").await.unwrap().unwrap();
        assert_eq!(page["hero"], "Welcome");

        let menu = store.menu_by_slug("primary").await.unwrap().unwrap();
        let items = store.menu_items(menu.id).await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].parent_id, Some(1));

        assert_eq!(store.entries("story").await.unwrap().len(), 1);
    }

    #[test]
    fn test_empty_file_is_valid() {
        let data: SeedData = serde_json::from_str("{}").unwrap();
        assert!(data.pages.is_empty());
        assert!(data.menus.is_empty());
        assert!(data.entries.is_empty());
    }
}
