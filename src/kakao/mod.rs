//! Chat-platform skill webhook: request envelope in, simple-text bubble out.

pub mod dto;
pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/kakao/recommend", post(handlers::recommend))
        .route("/kakao/record", post(handlers::record))
        .route("/kakao/history", post(handlers::history))
        .route("/kakao/favorites", post(handlers::favorites))
        .route("/kakao/health", get(handlers::health))
}
