use axum::{extract::State, Json};
use tracing::{debug, error, info, instrument, warn};

use super::dto::{KakaoRequest, KakaoResponse};
use crate::meals::dto::{MealEntry, MenuCount};
use crate::meals::services::{most_eaten_menus, recent_meals, recommend_for_user, record_meal};
use crate::menu::period::classify;
use crate::menu::{parse_meal_with, MealPeriod, MenuIndex, RecommendationCandidate, ThreadRandom};
use crate::state::AppState;

const NO_RECOMMENDATION: &str = "죄송합니다. 추천할 메뉴가 없습니다.";
const RECOMMEND_FAILED: &str = "응답 생성 중 오류가 발생했습니다.";
const RECORD_GUIDANCE: &str = "메뉴 이름을 찾을 수 없어요 😅\n\n\
    이렇게 말씀해주세요:\n\
    • \"김치찌개 먹었어\"\n\
    • \"점심에 파스타\"\n\
    • \"저녁 먹었어 돈카츠\"";
const RECORD_FAILED: &str = "기록 중 오류가 발생했어요 😭\n다시 시도해주세요!";
const NO_HISTORY: &str = "아직 기록된 식사가 없습니다.";
const HISTORY_FAILED: &str = "식사 기록을 불러오지 못했어요 😭";
const FAVORITES_FAILED: &str = "자주 먹은 메뉴를 불러오지 못했어요 😭";

/// POST /kakao/recommend
#[instrument(skip(state, payload))]
pub async fn recommend(
    State(state): State<AppState>,
    Json(payload): Json<KakaoRequest>,
) -> Json<KakaoResponse> {
    let user_id = payload.user_id();
    let now = state.now();
    info!(%user_id, utterance = %payload.utterance(), "recommendation request");

    let period = classify(payload.utterance(), now.time());
    let picks = match recommend_for_user(
        state.store.as_ref(),
        &state.engine,
        user_id,
        state.config.recommend_count,
        now,
        &mut ThreadRandom,
    )
    .await
    {
        Ok(p) => p,
        Err(e) => {
            error!(error = %e, %user_id, "recommendation failed");
            return Json(KakaoResponse::simple_text(RECOMMEND_FAILED));
        }
    };

    if picks.is_empty() {
        warn!(%user_id, "no recommendations available");
        return Json(KakaoResponse::simple_text(NO_RECOMMENDATION));
    }

    info!(%user_id, count = picks.len(), "recommendations ready");
    Json(KakaoResponse::simple_text(format_recommendations(period, &picks)))
}

/// POST /kakao/record
#[instrument(skip(state, payload))]
pub async fn record(
    State(state): State<AppState>,
    Json(payload): Json<KakaoRequest>,
) -> Json<KakaoResponse> {
    let user_id = payload.user_id();
    let now = state.now();
    info!(%user_id, utterance = %payload.utterance(), "record request");

    let catalog = match state.store.list_menus().await {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "load menus failed");
            return Json(KakaoResponse::simple_text(RECORD_FAILED));
        }
    };

    let index =
        MenuIndex::with_max_distance(&catalog, state.config.recommend.max_fuzzy_distance);
    let Some(parsed) = parse_meal_with(payload.utterance(), &index, now.time()) else {
        debug!(%user_id, "no menu name in utterance");
        return Json(KakaoResponse::simple_text(RECORD_GUIDANCE));
    };

    match record_meal(
        state.store.as_ref(),
        user_id,
        &parsed.menu_name,
        parsed.period,
        None,
        now,
    )
    .await
    {
        Ok((_, menu)) => Json(KakaoResponse::simple_text(format_recorded(
            parsed.period,
            &menu.name,
        ))),
        Err(e) => {
            error!(error = %e, %user_id, "record meal failed");
            Json(KakaoResponse::simple_text(RECORD_FAILED))
        }
    }
}

/// POST /kakao/history
#[instrument(skip(state, payload))]
pub async fn history(
    State(state): State<AppState>,
    Json(payload): Json<KakaoRequest>,
) -> Json<KakaoResponse> {
    let user_id = payload.user_id();
    info!(%user_id, "history request");

    let days = state.config.history_days;
    let entries = match recent_meals(state.store.as_ref(), user_id, days, state.now()).await {
        Ok(e) => e,
        Err(e) => {
            error!(error = %e, %user_id, "load history failed");
            return Json(KakaoResponse::simple_text(HISTORY_FAILED));
        }
    };

    if entries.is_empty() {
        return Json(KakaoResponse::simple_text(NO_HISTORY));
    }
    Json(KakaoResponse::simple_text(format_history(
        &entries,
        days,
        state.config.history_limit,
    )))
}

/// POST /kakao/favorites
#[instrument(skip(state, payload))]
pub async fn favorites(
    State(state): State<AppState>,
    Json(payload): Json<KakaoRequest>,
) -> Json<KakaoResponse> {
    let user_id = payload.user_id();
    info!(%user_id, "favorites request");

    let counts = match most_eaten_menus(state.store.as_ref(), user_id).await {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, %user_id, "load favorites failed");
            return Json(KakaoResponse::simple_text(FAVORITES_FAILED));
        }
    };

    if counts.is_empty() {
        return Json(KakaoResponse::simple_text(NO_HISTORY));
    }
    Json(KakaoResponse::simple_text(format_favorites(
        &counts,
        state.config.history_limit,
    )))
}

pub async fn health() -> &'static str {
    "Menu Bot is running!"
}

pub fn format_recommendations(period: MealPeriod, picks: &[RecommendationCandidate]) -> String {
    let mut out = format!("🍽️ {} 추천 메뉴입니다!\n\n", period.description());
    for (i, rec) in picks.iter().enumerate() {
        out.push_str(&format!("{}. {} ({})\n", i + 1, rec.menu_name, rec.category));
        if !rec.reason.is_empty() {
            out.push_str(&format!("   💡 {}\n", rec.reason));
        }
        out.push('\n');
    }
    out
}

pub fn format_recorded(period: MealPeriod, menu_name: &str) -> String {
    format!(
        "✅ 기록 완료!\n\n{}에 '{}' 드셨군요.\n다음 추천에 반영할게요! 😊",
        period.description(),
        menu_name
    )
}

pub fn format_history(entries: &[MealEntry], days: i64, limit: usize) -> String {
    let mut out = format!("📊 최근 {}일 식사 기록\n\n", days);
    for e in entries.iter().take(limit) {
        out.push_str(&format!(
            "• {} - {} ({})\n",
            e.eaten_at.date(),
            e.menu_name,
            e.period.description()
        ));
    }
    out
}

pub fn format_favorites(counts: &[MenuCount], limit: usize) -> String {
    let mut out = String::from("🏆 자주 먹은 메뉴\n\n");
    for (i, c) in counts.iter().take(limit).enumerate() {
        out.push_str(&format!("{}. {} ({}회)\n", i + 1, c.menu_name, c.count));
    }
    out
}
