use std::sync::Arc;

use time::OffsetDateTime;

use crate::config::AppConfig;
use crate::meals::repo::{default_menus, load_seed};
use crate::meals::{MealStore, MemoryStore};
use crate::menu::RecommendationEngine;

/// Where handlers read "now" from.
#[derive(Debug, Clone, Copy)]
pub enum Clock {
    System,
    Fixed(OffsetDateTime),
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn MealStore>,
    pub engine: Arc<RecommendationEngine>,
    pub clock: Clock,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let menus = match config.menu_seed_path.as_deref() {
            Some(path) => load_seed(path).await?,
            None => default_menus()?,
        };
        tracing::info!(menus = menus.len(), "menu catalog loaded");

        let store = Arc::new(MemoryStore::with_menus(menus)) as Arc<dyn MealStore>;
        Ok(Self::from_parts(config, store))
    }

    pub fn from_parts(config: Arc<AppConfig>, store: Arc<dyn MealStore>) -> Self {
        let engine = Arc::new(RecommendationEngine::new(config.recommend.clone()));
        Self {
            config,
            store,
            engine,
            clock: Clock::System,
        }
    }

    /// Current time in the configured offset.
    pub fn now(&self) -> OffsetDateTime {
        match self.clock {
            Clock::System => OffsetDateTime::now_utc().to_offset(self.config.utc_offset()),
            Clock::Fixed(at) => at,
        }
    }

    /// Empty in-memory state pinned to `now`, for tests.
    pub fn fake(now: OffsetDateTime) -> Self {
        let config = Arc::new(AppConfig::default());
        let store = Arc::new(MemoryStore::new()) as Arc<dyn MealStore>;
        Self {
            clock: Clock::Fixed(now),
            ..Self::from_parts(config, store)
        }
    }

    pub fn with_store(mut self, store: Arc<dyn MealStore>) -> Self {
        self.store = store;
        self
    }
}
