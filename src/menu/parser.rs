use time::Time;
use tracing::debug;

use super::extractor::extract;
use super::matcher::MenuIndex;
use super::model::{MenuItem, ParsedMeal};
use super::period::classify;

/// Turns a free-text meal statement into a period and a menu name.
///
/// The name is normalized against `catalog` when the matcher finds a known
/// menu; otherwise the extracted text is kept as a new menu name. Returns
/// `None` when no menu name can be found in the utterance.
pub fn parse_meal(utterance: &str, catalog: &[MenuItem], now: Time) -> Option<ParsedMeal> {
    parse_meal_with(utterance, &MenuIndex::new(catalog), now)
}

pub fn parse_meal_with(utterance: &str, index: &MenuIndex<'_>, now: Time) -> Option<ParsedMeal> {
    let period = classify(utterance, now);

    let Some(candidate) = extract(utterance, index.catalog()) else {
        debug!(%utterance, "no menu name in utterance");
        return None;
    };

    let menu_name = index
        .resolve(&candidate)
        .map(|m| m.name.clone())
        .unwrap_or(candidate);

    debug!(?period, menu = %menu_name, "parsed meal");
    Some(ParsedMeal { period, menu_name })
}

#[cfg(test)]
mod parser_tests {
    use super::*;
    use crate::menu::model::MealPeriod;
    use time::macros::time;

    fn menus() -> Vec<MenuItem> {
        vec![
            MenuItem::new("김치찌개", "한식"),
            MenuItem::new("파스타", "양식"),
            MenuItem::new("초밥", "일식"),
        ]
    }

    #[test]
    fn dinner_pasta_is_parsed() {
        let parsed = parse_meal("저녁에 파스타 먹었어", &menus(), time!(9:00)).unwrap();
        assert_eq!(parsed.period, MealPeriod::Dinner);
        assert_eq!(parsed.menu_name, "파스타");
    }

    #[test]
    fn typo_is_normalized_to_catalog_name() {
        let parsed = parse_meal("김치찌게 먹었어", &menus(), time!(12:30)).unwrap();
        assert_eq!(parsed.period, MealPeriod::Lunch);
        assert_eq!(parsed.menu_name, "김치찌개");
    }

    #[test]
    fn unknown_menu_is_kept_verbatim() {
        let parsed = parse_meal("오늘 마라탕 먹음", &menus(), time!(19:00)).unwrap();
        assert_eq!(parsed.menu_name, "마라탕");
        assert_eq!(parsed.period, MealPeriod::Dinner);
    }

    #[test]
    fn missing_name_is_none() {
        assert!(parse_meal("점심 먹었어", &menus(), time!(12:00)).is_none());
    }
}
