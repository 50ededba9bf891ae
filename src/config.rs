use serde::Deserialize;
use time::UtcOffset;

/// Weights and windows used by the recommendation engine.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecommendConfig {
    pub category_weight: f64,
    pub rating_weight: f64,
    pub novelty_bonus: f64,
    pub stale_long_bonus: f64,
    pub stale_short_bonus: f64,
    pub time_of_day_bonus: f64,
    pub jitter_max: f64,
    pub fallback_score: f64,
    /// Items eaten within this many days are not recommended again.
    pub exclusion_days: i64,
    pub stale_long_days: i64,
    pub stale_short_days: i64,
    pub light_lunch_max_kcal: u32,
    pub hearty_dinner_min_kcal: u32,
    pub max_fuzzy_distance: usize,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            category_weight: 30.0,
            rating_weight: 25.0,
            novelty_bonus: 30.0,
            stale_long_bonus: 15.0,
            stale_short_bonus: 10.0,
            time_of_day_bonus: 10.0,
            jitter_max: 5.0,
            fallback_score: 50.0,
            exclusion_days: 5,
            stale_long_days: 10,
            stale_short_days: 7,
            light_lunch_max_kcal: 500,
            hearty_dinner_min_kcal: 500,
            max_fuzzy_distance: 2,
        }
    }
}

impl RecommendConfig {
    /// First-generation weighting: heavier category and rating signals and a
    /// three day exclusion window.
    pub fn legacy() -> Self {
        Self {
            category_weight: 40.0,
            rating_weight: 30.0,
            novelty_bonus: 30.0,
            exclusion_days: 3,
            ..Self::default()
        }
    }

    pub fn from_profile(profile: &str) -> Self {
        match profile.trim().to_ascii_lowercase().as_str() {
            "legacy" => Self::legacy(),
            _ => Self::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub recommend: RecommendConfig,
    pub recommend_count: usize,
    pub history_days: i64,
    pub history_limit: usize,
    pub utc_offset_hours: i8,
    pub menu_seed_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            recommend: RecommendConfig::default(),
            recommend_count: 3,
            history_days: 7,
            history_limit: 10,
            utc_offset_hours: 9,
            menu_seed_path: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let profile = std::env::var("RECOMMEND_PROFILE").unwrap_or_else(|_| "current".into());
        let mut recommend = RecommendConfig::from_profile(&profile);
        if let Some(days) = env_parse::<i64>("RECOMMEND_EXCLUSION_DAYS") {
            recommend.exclusion_days = days;
        }

        let recommend_count = env_parse::<usize>("RECOMMEND_COUNT").unwrap_or(3);
        anyhow::ensure!(recommend_count > 0, "RECOMMEND_COUNT must be positive");

        let utc_offset_hours = env_parse::<i8>("UTC_OFFSET_HOURS").unwrap_or(9);
        UtcOffset::from_hms(utc_offset_hours, 0, 0)
            .map_err(|e| anyhow::anyhow!("UTC_OFFSET_HOURS out of range: {e}"))?;

        Ok(Self {
            recommend,
            recommend_count,
            history_days: env_parse::<i64>("HISTORY_DAYS").unwrap_or(7),
            history_limit: env_parse::<usize>("HISTORY_LIMIT").unwrap_or(10),
            utc_offset_hours,
            menu_seed_path: std::env::var("MENU_SEED_PATH").ok(),
        })
    }

    pub fn utc_offset(&self) -> UtcOffset {
        UtcOffset::from_hms(self.utc_offset_hours, 0, 0).unwrap_or(UtcOffset::UTC)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse::<T>().ok())
}

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn legacy_profile_uses_three_day_window() {
        let cfg = RecommendConfig::from_profile("Legacy");
        assert_eq!(cfg.exclusion_days, 3);
        assert_eq!(cfg.category_weight, 40.0);
        assert_eq!(cfg.rating_weight, 30.0);
    }

    #[test]
    fn unknown_profile_falls_back_to_current() {
        assert_eq!(RecommendConfig::from_profile("whatever"), RecommendConfig::default());
    }

    #[test]
    fn default_offset_is_korea() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.utc_offset().whole_hours(), 9);
    }
}
