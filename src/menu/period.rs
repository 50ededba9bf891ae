use time::Time;

use super::model::MealPeriod;

const LUNCH_KEYWORDS: [&str; 2] = ["점심", "런치"];
const DINNER_KEYWORDS: [&str; 2] = ["저녁", "디너"];

/// Explicit keywords win; otherwise 11:00-14:59 is lunch and every other hour dinner.
pub fn classify(utterance: &str, now: Time) -> MealPeriod {
    if LUNCH_KEYWORDS.iter().any(|k| utterance.contains(k)) {
        return MealPeriod::Lunch;
    }
    if DINNER_KEYWORDS.iter().any(|k| utterance.contains(k)) {
        return MealPeriod::Dinner;
    }
    period_for_hour(now.hour())
}

pub fn period_for_hour(hour: u8) -> MealPeriod {
    if (11..15).contains(&hour) {
        MealPeriod::Lunch
    } else {
        MealPeriod::Dinner
    }
}
