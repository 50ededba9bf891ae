use std::collections::{HashMap, HashSet};

use time::{Duration, OffsetDateTime};
use tracing::debug;
use uuid::Uuid;

use super::model::{MealRecord, MenuItem, RecommendationCandidate};
use super::random::RandomSource;
use super::scorer::{HistoryStats, RecommendationScorer};
use crate::config::RecommendConfig;
use crate::error::CoreError;

pub const FALLBACK_REASON: &str = "첫 추천이에요! 맛있게 드세요 😊";

/// Ranks a catalog against one user's history snapshot. Read-only over its inputs.
#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    config: RecommendConfig,
}

impl RecommendationEngine {
    pub fn new(config: RecommendConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RecommendConfig {
        &self.config
    }

    /// Returns at most `count` candidates, best first.
    ///
    /// With no history the picks are drawn uniformly from the catalog, with
    /// replacement, at a flat score. Otherwise items eaten inside the exclusion
    /// window are skipped and the rest are scored and sorted.
    pub fn recommend<R: RandomSource + ?Sized>(
        &self,
        history: &[MealRecord],
        catalog: &[MenuItem],
        count: usize,
        now: OffsetDateTime,
        rng: &mut R,
    ) -> Result<Vec<RecommendationCandidate>, CoreError> {
        if count == 0 {
            return Err(CoreError::ZeroCount);
        }
        if catalog.is_empty() {
            debug!("empty catalog, nothing to recommend");
            return Ok(Vec::new());
        }
        if history.is_empty() {
            return Ok(self.random_picks(catalog, count, rng));
        }

        let window_start = now - Duration::days(self.config.exclusion_days);
        let recent: HashSet<Uuid> = history
            .iter()
            .filter(|h| h.eaten_at > window_start)
            .map(|h| h.menu_id)
            .collect();

        let by_id: HashMap<Uuid, &MenuItem> = catalog.iter().map(|m| (m.id, m)).collect();
        let stats = HistoryStats::build(history, &by_id);
        let scorer = RecommendationScorer::new(&self.config);

        let mut candidates: Vec<RecommendationCandidate> = catalog
            .iter()
            .filter(|m| !recent.contains(&m.id))
            .map(|m| {
                let (score, reason) = scorer.score(m, &stats, now, rng);
                RecommendationCandidate::from_menu(m, score, reason)
            })
            .collect();

        // stable: equal scores keep catalog order
        candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
        candidates.truncate(count);

        debug!(
            excluded = recent.len(),
            returned = candidates.len(),
            "scored recommendations"
        );
        Ok(candidates)
    }

    fn random_picks<R: RandomSource + ?Sized>(
        &self,
        catalog: &[MenuItem],
        count: usize,
        rng: &mut R,
    ) -> Vec<RecommendationCandidate> {
        let n = count.min(catalog.len());
        debug!(n, "no history, random recommendations");
        (0..n)
            .map(|_| {
                let menu = &catalog[rng.index(catalog.len())];
                RecommendationCandidate::from_menu(
                    menu,
                    self.config.fallback_score,
                    FALLBACK_REASON.to_string(),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod engine_tests {
    use super::*;
    use crate::menu::model::MealPeriod;
    use crate::menu::random::{FixedRandom, SeededRandom};
    use time::macros::datetime;

    const NOW: OffsetDateTime = datetime!(2024-05-20 09:00 +9);

    fn record(menu: &MenuItem, days_ago: i64, rating: Option<u8>) -> MealRecord {
        MealRecord::new(menu, "u1", MealPeriod::Lunch, NOW - Duration::days(days_ago), rating)
            .unwrap()
    }

    fn names(c: &[RecommendationCandidate]) -> Vec<&str> {
        c.iter().map(|c| c.menu_name.as_str()).collect()
    }

    #[test]
    fn zero_count_is_contract_violation() {
        let engine = RecommendationEngine::default();
        let err = engine
            .recommend(&[], &[MenuItem::new("라멘", "일식")], 0, NOW, &mut FixedRandom::zero())
            .unwrap_err();
        assert_eq!(err, CoreError::ZeroCount);
    }

    #[test]
    fn empty_catalog_yields_nothing() {
        let engine = RecommendationEngine::default();
        let ramen = MenuItem::new("라멘", "일식");
        let history = vec![record(&ramen, 3, Some(5))];
        let out = engine.recommend(&history, &[], 3, NOW, &mut FixedRandom::zero()).unwrap();
        assert!(out.is_empty());
        let out = engine.recommend(&[], &[], 3, NOW, &mut FixedRandom::zero()).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn no_history_falls_back_to_random_picks() {
        let engine = RecommendationEngine::default();
        let catalog = vec![MenuItem::new("라멘", "일식"), MenuItem::new("피자", "양식")];

        let out = engine
            .recommend(&[], &catalog, 5, NOW, &mut FixedRandom { jitter: 0.0, index: 1 })
            .unwrap();
        assert_eq!(out.len(), 2);
        // sampling is with replacement
        assert_eq!(names(&out), vec!["피자", "피자"]);
        for c in &out {
            assert_eq!(c.score, 50.0);
            assert_eq!(c.reason, FALLBACK_REASON);
        }

        let out = engine.recommend(&[], &catalog, 1, NOW, &mut SeededRandom::new(3)).unwrap();
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn recently_eaten_item_is_excluded() {
        let engine = RecommendationEngine::default();
        let ramen = MenuItem::new("라멘", "일식");
        let pizza = MenuItem::new("피자", "양식");
        let history = vec![record(&ramen, 2, None)];
        let out = engine
            .recommend(&history, &[ramen, pizza], 3, NOW, &mut FixedRandom::zero())
            .unwrap();
        assert_eq!(names(&out), vec!["피자"]);
    }

    #[test]
    fn legacy_window_is_three_days() {
        let engine = RecommendationEngine::new(RecommendConfig::legacy());
        let ramen = MenuItem::new("라멘", "일식");
        let history = vec![record(&ramen, 4, None)];
        let out = engine
            .recommend(&history, std::slice::from_ref(&ramen), 3, NOW, &mut FixedRandom::zero())
            .unwrap();
        assert_eq!(names(&out), vec!["라멘"]);

        let out = RecommendationEngine::default()
            .recommend(&history, &[ramen], 3, NOW, &mut FixedRandom::zero())
            .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn rated_aligned_unseen_item_outranks_recent_off_category_one() {
        let engine = RecommendationEngine::default();
        let bibimbap = MenuItem::new("비빔밥", "한식");
        let kimchi = MenuItem::new("김치찌개", "한식");
        let burger = MenuItem::new("햄버거", "양식");
        let history = vec![
            record(&bibimbap, 30, Some(5)),
            record(&kimchi, 25, Some(4)),
            record(&kimchi, 6, None),
            record(&burger, 8, None),
        ];
        let catalog = vec![burger.clone(), kimchi.clone(), bibimbap.clone()];
        let out = engine
            .recommend(&history, &catalog, 3, NOW, &mut FixedRandom::zero())
            .unwrap();
        assert_eq!(names(&out), vec!["비빔밥", "김치찌개", "햄버거"]);
        assert!(out[0].score > out[2].score);
    }

    #[test]
    fn ramen_sushi_pizza_scenario() {
        let engine = RecommendationEngine::default();
        let ramen = MenuItem::new("라멘", "일식");
        let sushi = MenuItem::new("초밥", "일식");
        let pizza = MenuItem::new("피자", "양식");
        let history = vec![record(&ramen, 3, Some(5))];
        let catalog = vec![ramen, sushi, pizza];

        let out = engine
            .recommend(&history, &catalog, 2, NOW, &mut FixedRandom::zero())
            .unwrap();
        assert_eq!(names(&out), vec!["초밥", "피자"]);
        // category affinity: 1/1 * 30 on top of the novelty bonus
        assert_eq!(out[0].score, 60.0);
        assert_eq!(out[1].score, 30.0);
        assert_eq!(out[0].reason, "일식 자주 드셨네요 | 새로운 메뉴 도전!");
    }

    #[test]
    fn output_is_truncated_to_count() {
        let engine = RecommendationEngine::default();
        let eaten = MenuItem::new("라멘", "일식");
        let mut catalog: Vec<MenuItem> = (0..10)
            .map(|i| MenuItem::new(format!("메뉴{i}"), "기타"))
            .collect();
        catalog.push(eaten.clone());
        let history = vec![record(&eaten, 20, None)];
        let out = engine
            .recommend(&history, &catalog, 3, NOW, &mut SeededRandom::new(42))
            .unwrap();
        assert_eq!(out.len(), 3);
        assert!(out.windows(2).all(|w| w[0].score >= w[1].score));
    }
}
