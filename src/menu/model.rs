use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::CoreError;

/// Category given to menus created on the fly from a meal record.
pub const UNCATEGORIZED: &str = "기타";

/// Which daily meal an utterance or record refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MealPeriod {
    Lunch,
    Dinner,
}

impl MealPeriod {
    pub fn description(self) -> &'static str {
        match self {
            MealPeriod::Lunch => "점심",
            MealPeriod::Dinner => "저녁",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub calories: Option<u32>,
    pub spicy_level: Option<u8>, // 0-5
}

impl MenuItem {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category: category.into(),
            calories: None,
            spicy_level: None,
        }
    }

    pub fn uncategorized(name: impl Into<String>) -> Self {
        Self::new(name, UNCATEGORIZED)
    }

    pub fn with_calories(mut self, kcal: u32) -> Self {
        self.calories = Some(kcal);
        self
    }

    pub fn with_spicy_level(mut self, level: u8) -> Self {
        self.spicy_level = Some(level.min(5));
        self
    }
}

/// One entry of a user's append-only meal log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealRecord {
    pub id: Uuid,
    pub menu_id: Uuid,
    pub user_id: String,
    pub period: MealPeriod,
    pub eaten_at: OffsetDateTime,
    pub rating: Option<u8>, // 1-5
}

impl MealRecord {
    pub fn new(
        menu: &MenuItem,
        user_id: impl Into<String>,
        period: MealPeriod,
        eaten_at: OffsetDateTime,
        rating: Option<u8>,
    ) -> Result<Self, CoreError> {
        Self::validate_rating(rating)?;
        Ok(Self {
            id: Uuid::new_v4(),
            menu_id: menu.id,
            user_id: user_id.into(),
            period,
            eaten_at,
            rating,
        })
    }

    /// A satisfaction rating, when given, must be in 1..=5.
    pub fn validate_rating(rating: Option<u8>) -> Result<(), CoreError> {
        match rating {
            Some(r) if !(1..=5).contains(&r) => Err(CoreError::RatingOutOfRange(r)),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationCandidate {
    pub menu_name: String,
    pub category: String,
    pub calories: Option<u32>,
    pub spicy_level: Option<u8>,
    pub score: f64,
    pub reason: String,
}

impl RecommendationCandidate {
    pub(crate) fn from_menu(menu: &MenuItem, score: f64, reason: String) -> Self {
        Self {
            menu_name: menu.name.clone(),
            category: menu.category.clone(),
            calories: menu.calories,
            spicy_level: menu.spicy_level,
            score,
            reason,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedMeal {
    pub period: MealPeriod,
    pub menu_name: String,
}
