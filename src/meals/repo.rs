use std::collections::HashSet;

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use crate::menu::{MealRecord, MenuItem};

/// Storage seam for the menu catalog and the append-only meal log.
#[async_trait]
pub trait MealStore: Send + Sync {
    async fn list_menus(&self) -> anyhow::Result<Vec<MenuItem>>;
    /// Returns the menu with this name, creating an uncategorized one if absent.
    async fn get_or_create_menu(&self, name: &str) -> anyhow::Result<MenuItem>;
    async fn append_record(&self, record: MealRecord) -> anyhow::Result<MealRecord>;
    async fn history_for_user(&self, user_id: &str) -> anyhow::Result<Vec<MealRecord>>;
    /// Records at or after `since`, newest first.
    async fn recent_for_user(
        &self,
        user_id: &str,
        since: OffsetDateTime,
    ) -> anyhow::Result<Vec<MealRecord>>;
}

#[derive(Default)]
struct Tables {
    menus: Vec<MenuItem>,
    records: Vec<MealRecord>,
}

/// Process-lifetime store. Writes take the lock exclusively, so a
/// find-or-create and an append never interleave with another writer.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later duplicates of a name are dropped.
    pub fn with_menus(menus: Vec<MenuItem>) -> Self {
        let mut seen = HashSet::new();
        let menus = menus
            .into_iter()
            .filter(|m| seen.insert(m.name.clone()))
            .collect();
        Self {
            tables: RwLock::new(Tables {
                menus,
                records: Vec::new(),
            }),
        }
    }
}

#[async_trait]
impl MealStore for MemoryStore {
    async fn list_menus(&self) -> anyhow::Result<Vec<MenuItem>> {
        Ok(self.tables.read().await.menus.clone())
    }

    async fn get_or_create_menu(&self, name: &str) -> anyhow::Result<MenuItem> {
        let mut t = self.tables.write().await;
        if let Some(existing) = t.menus.iter().find(|m| m.name == name) {
            return Ok(existing.clone());
        }
        let menu = MenuItem::uncategorized(name);
        t.menus.push(menu.clone());
        tracing::debug!(menu = %name, "created menu");
        Ok(menu)
    }

    async fn append_record(&self, record: MealRecord) -> anyhow::Result<MealRecord> {
        let mut t = self.tables.write().await;
        anyhow::ensure!(
            t.menus.iter().any(|m| m.id == record.menu_id),
            "record references unknown menu {}",
            record.menu_id
        );
        t.records.push(record.clone());
        Ok(record)
    }

    async fn history_for_user(&self, user_id: &str) -> anyhow::Result<Vec<MealRecord>> {
        let t = self.tables.read().await;
        Ok(t.records
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn recent_for_user(
        &self,
        user_id: &str,
        since: OffsetDateTime,
    ) -> anyhow::Result<Vec<MealRecord>> {
        let mut rows = self.history_for_user(user_id).await?;
        rows.retain(|r| r.eaten_at >= since);
        rows.sort_by(|a, b| b.eaten_at.cmp(&a.eaten_at));
        Ok(rows)
    }
}

/// One catalog entry in a seed file.
#[derive(Debug, Deserialize)]
pub struct MenuSeed {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub calories: Option<u32>,
    #[serde(default)]
    pub spicy_level: Option<u8>,
}

impl From<MenuSeed> for MenuItem {
    fn from(s: MenuSeed) -> Self {
        let mut menu = MenuItem::new(s.name, s.category);
        menu.calories = s.calories;
        if let Some(level) = s.spicy_level {
            menu = menu.with_spicy_level(level);
        }
        menu
    }
}

pub fn parse_seed(json: &str) -> anyhow::Result<Vec<MenuItem>> {
    let seeds: Vec<MenuSeed> = serde_json::from_str(json).context("parse menu seed")?;
    anyhow::ensure!(
        seeds.iter().all(|s| !s.name.trim().is_empty()),
        "menu seed contains an empty name"
    );
    Ok(seeds.into_iter().map(MenuItem::from).collect())
}

pub async fn load_seed(path: &str) -> anyhow::Result<Vec<MenuItem>> {
    let json = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("read menu seed {}", path))?;
    parse_seed(&json)
}

pub fn default_menus() -> anyhow::Result<Vec<MenuItem>> {
    parse_seed(include_str!("../../seed/menus.json"))
}
