use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    client::roblox::PlaceDetails,
    core::{
        category::Category,
        game::GameRecord,
        leaderboard::{Leaderboard, Source},
        provider::{clamp_limit, DEFAULT_LIMIT},
    },
    error::{AppError, AppResult},
    server::AppState,
};

#[derive(Debug, Default, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<String>,
}

/// Missing or non-numeric limits use the default, numeric ones are clamped.
pub fn parse_limit(limit: Option<&str>) -> usize {
    match limit.map(|l| l.trim().parse::<i64>()) {
        Some(Ok(limit)) => clamp_limit(limit),
        _ => DEFAULT_LIMIT,
    }
}

pub fn parse_category(category: &str) -> AppResult<Category> {
    category
        .parse::<Category>()
        .map_err(|_| AppError::UnknownCategory(category.to_string()))
}

pub fn cache_control(freshness: Duration) -> String {
    format!(
        "public, s-maxage={0}, stale-while-revalidate={0}",
        freshness.num_seconds()
    )
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LeaderboardResponse<'a> {
    success: bool,
    games: &'a [GameRecord],
    last_updated: DateTime<Utc>,
    next_update: DateTime<Utc>,
    total_count: usize,
    sort_type: Category,
    source: Source,
}

impl<'a> LeaderboardResponse<'a> {
    fn new(leaderboard: &'a Leaderboard, freshness: Duration) -> Self {
        LeaderboardResponse {
            success: true,
            games: &leaderboard.games,
            last_updated: leaderboard.timestamp,
            next_update: leaderboard.next_update(freshness),
            total_count: leaderboard.games.len(),
            sort_type: leaderboard.category,
            source: leaderboard.source,
        }
    }
}

pub async fn leaderboard(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Query(query): Query<LimitQuery>,
) -> AppResult<Response> {
    let category = parse_category(&category)?;
    let limit = parse_limit(query.limit.as_deref());

    let leaderboard = state.provider.games(category, limit).await;
    let freshness = state.provider.freshness();

    Ok((
        [(header::CACHE_CONTROL, cache_control(freshness))],
        Json(LeaderboardResponse::new(&leaderboard, freshness)),
    )
        .into_response())
}

/// Relays the upstream place details for one place id.
pub async fn game_details(
    State(state): State<AppState>,
    Path(place_id): Path<u64>,
) -> AppResult<Json<Vec<PlaceDetails>>> {
    let places = state
        .provider
        .client()
        .place_details(place_id)
        .await
        .map_err(|e| AppError::PlaceDetails(e.to_string()))?;
    Ok(Json(places))
}
