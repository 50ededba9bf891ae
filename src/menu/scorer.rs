use std::collections::HashMap;

use time::OffsetDateTime;
use uuid::Uuid;

use super::model::{MealRecord, MenuItem};
use super::random::RandomSource;
use crate::config::RecommendConfig;

pub const DEFAULT_REASON: &str = "맛있게 드세요! 😊";

/// Aggregates over a user's full history, computed once per recommendation call.
#[derive(Debug, Default, Clone)]
pub struct HistoryStats {
    pub total: usize,
    pub category_frequency: HashMap<String, usize>,
    pub avg_rating: HashMap<Uuid, f64>,
    pub last_eaten: HashMap<Uuid, OffsetDateTime>,
}

impl HistoryStats {
    /// Records whose menu is missing from `menus_by_id` still count toward
    /// `total` but contribute no category.
    pub fn build(history: &[MealRecord], menus_by_id: &HashMap<Uuid, &MenuItem>) -> Self {
        let mut category_frequency: HashMap<String, usize> = HashMap::new();
        let mut ratings: HashMap<Uuid, (u32, u32)> = HashMap::new();
        let mut last_eaten: HashMap<Uuid, OffsetDateTime> = HashMap::new();

        for rec in history {
            if let Some(menu) = menus_by_id.get(&rec.menu_id) {
                *category_frequency.entry(menu.category.clone()).or_default() += 1;
            }
            if let Some(r) = rec.rating {
                let e = ratings.entry(rec.menu_id).or_default();
                e.0 += u32::from(r);
                e.1 += 1;
            }
            last_eaten
                .entry(rec.menu_id)
                .and_modify(|at| {
                    if rec.eaten_at > *at {
                        *at = rec.eaten_at;
                    }
                })
                .or_insert(rec.eaten_at);
        }

        let avg_rating = ratings
            .into_iter()
            .map(|(id, (sum, n))| (id, f64::from(sum) / f64::from(n)))
            .collect();

        Self {
            total: history.len(),
            category_frequency,
            avg_rating,
            last_eaten,
        }
    }
}

/// Additive scoring of one catalog item. Every component is independent;
/// there is no normalization or cap.
pub struct RecommendationScorer<'c> {
    config: &'c RecommendConfig,
}

impl<'c> RecommendationScorer<'c> {
    pub fn new(config: &'c RecommendConfig) -> Self {
        Self { config }
    }

    pub fn score<R: RandomSource + ?Sized>(
        &self,
        menu: &MenuItem,
        stats: &HistoryStats,
        now: OffsetDateTime,
        rng: &mut R,
    ) -> (f64, String) {
        let cfg = self.config;
        let mut score = 0.0;
        let mut reasons: Vec<String> = Vec::new();

        // category affinity
        let category_count = stats
            .category_frequency
            .get(&menu.category)
            .copied()
            .unwrap_or(0);
        score += category_count as f64 / stats.total.max(1) as f64 * cfg.category_weight;
        if category_count > 0 {
            reasons.push(format!("{} 자주 드셨네요", menu.category));
        }

        // rating affinity; no rating means no signal, not zero
        if let Some(avg) = stats.avg_rating.get(&menu.id) {
            score += avg / 5.0 * cfg.rating_weight;
            reasons.push(format!("| 평점 {:.1}점", avg));
        }

        // novelty or staleness
        match stats.last_eaten.get(&menu.id) {
            None => {
                score += cfg.novelty_bonus;
                reasons.push("| 새로운 메뉴 도전!".to_string());
            }
            Some(last) => {
                let days_since = days_between(*last, now);
                if days_since > cfg.stale_long_days {
                    score += cfg.stale_long_bonus;
                    reasons.push(format!("| {}일만에 추천", days_since));
                } else if days_since > cfg.stale_short_days {
                    score += cfg.stale_short_bonus;
                }
            }
        }

        // time-of-day fit
        if let Some(kcal) = menu.calories {
            let hour = now.hour();
            if (11..15).contains(&hour) && kcal < cfg.light_lunch_max_kcal {
                score += cfg.time_of_day_bonus;
                reasons.push("| 가벼운 점심".to_string());
            } else if (17..21).contains(&hour) && kcal > cfg.hearty_dinner_min_kcal {
                score += cfg.time_of_day_bonus;
                reasons.push("| 든든한 저녁".to_string());
            }
        }

        score += rng.jitter(cfg.jitter_max);

        let reason = reasons.join(" ").trim().to_string();
        let reason = if reason.is_empty() {
            DEFAULT_REASON.to_string()
        } else {
            reason
        };
        (score, reason)
    }
}

/// Whole calendar days between two instants, using `now`'s offset for both dates.
pub fn days_between(earlier: OffsetDateTime, now: OffsetDateTime) -> i64 {
    let from = earlier.to_offset(now.offset()).date();
    (now.date() - from).whole_days()
}
