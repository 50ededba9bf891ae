use serde::Serialize;
use time::OffsetDateTime;

use crate::menu::MealPeriod;

/// A meal record joined with its menu name, for history listings.
#[derive(Debug, Clone, Serialize)]
pub struct MealEntry {
    pub menu_name: String,
    pub period: MealPeriod,
    #[serde(with = "time::serde::rfc3339")]
    pub eaten_at: OffsetDateTime,
    pub rating: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuCount {
    pub menu_name: String,
    pub count: usize,
}
