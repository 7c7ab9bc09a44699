use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::core::provider::LeaderboardProvider;

pub mod api;
pub mod health;
pub mod page;
pub mod templates;

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<LeaderboardProvider>,
}

impl AppState {
    pub fn new(provider: Arc<LeaderboardProvider>) -> Self {
        AppState { provider }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(page::leaderboard_page))
        .route("/api/{category}", get(api::leaderboard))
        .route("/api/game/{id}", get(api::game_details))
        .merge(health::router())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
