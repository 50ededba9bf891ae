use std::collections::HashMap;

use anyhow::Context;
use time::{Duration, OffsetDateTime};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::dto::{MealEntry, MenuCount};
use super::repo::MealStore;
use crate::error::CoreError;
use crate::menu::{
    MealPeriod, MealRecord, MenuItem, RandomSource, RecommendationCandidate, RecommendationEngine,
};

/// Appends a meal for `user_id`, creating the menu if the name is new.
pub async fn record_meal(
    store: &dyn MealStore,
    user_id: &str,
    menu_name: &str,
    period: MealPeriod,
    rating: Option<u8>,
    now: OffsetDateTime,
) -> anyhow::Result<(MealRecord, MenuItem)> {
    let menu_name = menu_name.trim();
    if menu_name.is_empty() {
        return Err(CoreError::EmptyMenuName.into());
    }
    // checked before the menu is created so a bad rating leaves no orphan menu
    MealRecord::validate_rating(rating)?;

    let menu = store
        .get_or_create_menu(menu_name)
        .await
        .with_context(|| format!("get or create menu {}", menu_name))?;
    let record = MealRecord::new(&menu, user_id, period, now, rating)?;
    let record = store.append_record(record).await.context("append meal record")?;

    info!(%user_id, menu = %menu.name, ?period, "meal recorded");
    Ok((record, menu))
}

/// Loads the user's snapshot and ranks the catalog against it.
pub async fn recommend_for_user<R: RandomSource + Send + ?Sized>(
    store: &dyn MealStore,
    engine: &RecommendationEngine,
    user_id: &str,
    count: usize,
    now: OffsetDateTime,
    rng: &mut R,
) -> anyhow::Result<Vec<RecommendationCandidate>> {
    let history = store
        .history_for_user(user_id)
        .await
        .context("load meal history")?;
    let catalog = store.list_menus().await.context("load menus")?;
    if catalog.is_empty() {
        warn!("no menus available");
    }
    debug!(%user_id, history = history.len(), menus = catalog.len(), "recommending");

    let picks = engine.recommend(&history, &catalog, count, now, rng)?;
    Ok(picks)
}

/// Meals from the last `days` days, newest first.
pub async fn recent_meals(
    store: &dyn MealStore,
    user_id: &str,
    days: i64,
    now: OffsetDateTime,
) -> anyhow::Result<Vec<MealEntry>> {
    let since = now - Duration::days(days);
    let records = store
        .recent_for_user(user_id, since)
        .await
        .context("load recent meals")?;
    let names = menu_names(store).await?;

    Ok(records
        .into_iter()
        .map(|r| MealEntry {
            menu_name: names
                .get(&r.menu_id)
                .cloned()
                .unwrap_or_else(|| r.menu_id.to_string()),
            period: r.period,
            eaten_at: r.eaten_at,
            rating: r.rating,
        })
        .collect())
}

/// Menus the user ate most often; ties keep first-eaten order.
pub async fn most_eaten_menus(
    store: &dyn MealStore,
    user_id: &str,
) -> anyhow::Result<Vec<MenuCount>> {
    let history = store
        .history_for_user(user_id)
        .await
        .context("load meal history")?;
    let names = menu_names(store).await?;

    let mut order: Vec<Uuid> = Vec::new();
    let mut counts: HashMap<Uuid, usize> = HashMap::new();
    for r in &history {
        let c = counts.entry(r.menu_id).or_insert_with(|| {
            order.push(r.menu_id);
            0
        });
        *c += 1;
    }

    let mut out: Vec<MenuCount> = order
        .into_iter()
        .map(|id| MenuCount {
            menu_name: names.get(&id).cloned().unwrap_or_else(|| id.to_string()),
            count: counts[&id],
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count));
    Ok(out)
}

async fn menu_names(store: &dyn MealStore) -> anyhow::Result<HashMap<Uuid, String>> {
    let menus = store.list_menus().await.context("load menus")?;
    Ok(menus.into_iter().map(|m| (m.id, m.name)).collect())
}

#[cfg(test)]
mod service_tests {
    use super::*;
    use crate::meals::repo::MemoryStore;
    use crate::menu::FixedRandom;
    use time::macros::datetime;

    const NOW: OffsetDateTime = datetime!(2024-05-20 12:30 +9);

    #[tokio::test]
    async fn record_creates_uncategorized_menu() {
        let store = MemoryStore::new();
        let (rec, menu) = record_meal(&store, "u1", " 마라탕 ", MealPeriod::Dinner, None, NOW)
            .await
            .unwrap();
        assert_eq!(menu.name, "마라탕");
        assert_eq!(menu.category, "기타");
        assert_eq!(rec.menu_id, menu.id);
        assert_eq!(rec.eaten_at, NOW);
    }

    #[tokio::test]
    async fn record_reuses_existing_menu() {
        let sushi = MenuItem::new("초밥", "일식");
        let store = MemoryStore::with_menus(vec![sushi.clone()]);
        let (_, menu) = record_meal(&store, "u1", "초밥", MealPeriod::Lunch, Some(5), NOW)
            .await
            .unwrap();
        assert_eq!(menu.id, sushi.id);
        assert_eq!(store.list_menus().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn record_rejects_bad_input() {
        let store = MemoryStore::new();
        let err = record_meal(&store, "u1", "라멘", MealPeriod::Lunch, Some(7), NOW)
            .await
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<CoreError>(),
            Some(&CoreError::RatingOutOfRange(7))
        );
        let err = record_meal(&store, "u1", "  ", MealPeriod::Lunch, None, NOW)
            .await
            .unwrap_err();
        assert_eq!(err.downcast_ref::<CoreError>(), Some(&CoreError::EmptyMenuName));
        assert!(store.list_menus().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn recommendation_skips_what_was_just_recorded() {
        let store = MemoryStore::with_menus(vec![
            MenuItem::new("라멘", "일식"),
            MenuItem::new("초밥", "일식"),
            MenuItem::new("피자", "양식"),
        ]);
        record_meal(&store, "u1", "라멘", MealPeriod::Dinner, Some(5), NOW - Duration::days(3))
            .await
            .unwrap();

        let engine = RecommendationEngine::default();
        let picks = recommend_for_user(&store, &engine, "u1", 2, NOW, &mut FixedRandom::zero())
            .await
            .unwrap();
        let names: Vec<_> = picks.iter().map(|p| p.menu_name.as_str()).collect();
        assert_eq!(names, vec!["초밥", "피자"]);
    }

    #[tokio::test]
    async fn zero_count_surfaces_core_error() {
        let store = MemoryStore::with_menus(vec![MenuItem::new("라멘", "일식")]);
        let engine = RecommendationEngine::default();
        let err = recommend_for_user(&store, &engine, "u1", 0, NOW, &mut FixedRandom::zero())
            .await
            .unwrap_err();
        assert_eq!(err.downcast_ref::<CoreError>(), Some(&CoreError::ZeroCount));
    }

    #[tokio::test]
    async fn recent_and_most_eaten() {
        let store = MemoryStore::new();
        for (name, days) in [("김밥", 9), ("라멘", 4), ("김밥", 2), ("김밥", 1), ("라멘", 0)] {
            record_meal(&store, "u1", name, MealPeriod::Lunch, None, NOW - Duration::days(days))
                .await
                .unwrap();
        }

        let recent = recent_meals(&store, "u1", 7, NOW).await.unwrap();
        let names: Vec<_> = recent.iter().map(|e| e.menu_name.as_str()).collect();
        assert_eq!(names, vec!["라멘", "김밥", "김밥", "라멘"]);

        let top = most_eaten_menus(&store, "u1").await.unwrap();
        assert_eq!(
            top,
            vec![
                MenuCount { menu_name: "김밥".into(), count: 3 },
                MenuCount { menu_name: "라멘".into(), count: 2 },
            ]
        );
        assert!(most_eaten_menus(&store, "nobody").await.unwrap().is_empty());
    }
}
