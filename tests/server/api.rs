//! Tests for the `/api/{category}`, `/api/game/{id}` and `/health` endpoints,
//! served through the full router against a mock upstream.

use axum::http::{header, StatusCode};
use mockito::Matcher;

use crate::setup::{body_json, test_setup};

/// An upstream outage still answers with a full leaderboard built from sample data.
#[tokio::test]
async fn upstream_outage_serves_fallback_leaderboard() {
    let mut test = test_setup().await;
    let _upstream = test.with_upstream_down().await;

    let response = test.get("/api/trending").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["source"], "fallback");
    assert_eq!(body["sortType"], "trending");

    let games = body["games"].as_array().unwrap();
    assert!(games.len() >= 12);
    assert_eq!(body["totalCount"], games.len());
    for (idx, game) in games.iter().enumerate() {
        assert_eq!(game["rank"], idx + 1);
        assert!(!game["name"].as_str().unwrap().is_empty());
        assert!(game["creatorName"].is_string());
    }
}

#[tokio::test]
async fn limit_defaults_to_fifty_and_is_capped() {
    let mut test = test_setup().await;
    let _upstream = test.with_upstream_down().await;

    let body = body_json(test.get("/api/top-visited").await).await;
    assert_eq!(body["games"].as_array().unwrap().len(), 50);

    let body = body_json(test.get("/api/top-visited?limit=500").await).await;
    assert!(body["games"].as_array().unwrap().len() <= 100);

    let body = body_json(test.get("/api/top-visited?limit=5").await).await;
    assert_eq!(body["games"].as_array().unwrap().len(), 5);
    assert_eq!(body["games"][0]["name"], "Blox Fruits");

    let body = body_json(test.get("/api/top-visited?limit=lots").await).await;
    assert_eq!(body["games"].as_array().unwrap().len(), 50);
}

#[tokio::test]
async fn legacy_category_alias_is_accepted() {
    let mut test = test_setup().await;
    let _upstream = test.with_upstream_down().await;

    let body = body_json(test.get("/api/top-playing?limit=3").await).await;
    assert_eq!(body["sortType"], "top-playing-now");
    assert_eq!(body["games"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn unknown_category_is_not_found() {
    let test = test_setup().await;

    let response = test.get("/api/most-hated").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("most-hated"));
}

#[tokio::test]
async fn responses_carry_cache_headers_and_timestamps() {
    let mut test = test_setup().await;
    let _upstream = test.with_upstream_down().await;

    let response = test.get("/api/top-rated?limit=10").await;
    assert_eq!(
        response.headers()[header::CACHE_CONTROL],
        "public, s-maxage=30, stale-while-revalidate=30"
    );

    let body = body_json(response).await;
    let last_updated: chrono::DateTime<chrono::Utc> =
        body["lastUpdated"].as_str().unwrap().parse().unwrap();
    let next_update: chrono::DateTime<chrono::Utc> =
        body["nextUpdate"].as_str().unwrap().parse().unwrap();
    assert_eq!(next_update - last_updated, chrono::Duration::seconds(30));
}

#[tokio::test]
async fn repeated_requests_hit_the_cache() {
    let mut test = test_setup().await;
    let sorts = test
        .server
        .mock("GET", "/v1/games/sorts")
        .match_query(Matcher::Any)
        .with_status(503)
        .expect(1)
        .create_async()
        .await;

    let first = body_json(test.get("/api/top-earning?limit=20").await).await;
    let second = body_json(test.get("/api/top-earning?limit=20").await).await;

    sorts.assert_async().await;
    assert_eq!(first, second);
    assert_eq!(test.cache.len(), 1);
}

#[tokio::test]
async fn live_upstream_games_are_served() {
    let mut test = test_setup().await;
    let _sorts = test
        .server
        .mock("GET", "/v1/games/sorts")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"sorts": [{"token": "tok", "name": "Trending", "displayName": "Trending"}]}"#)
        .create_async()
        .await;
    let _list = test
        .server
        .mock("GET", "/v1/games/list")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            r#"{"games": [
                {"universeId": 5, "placeId": 50, "name": "Slow Climb", "playerCount": 40},
                {"universeId": 6, "placeId": 60, "name": "Hot Newcomer", "playerCount": 4000,
                 "totalUpVotes": 900, "totalDownVotes": 100}
            ]}"#,
        )
        .create_async()
        .await;
    // Enrichment lookups fail, the listing alone is enough.
    let _rest = test
        .server
        .mock("GET", Matcher::Regex(r"^/v1/games(/icons|/multiget/thumbnails)?$".to_string()))
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let body = body_json(test.get("/api/trending").await).await;

    assert_eq!(body["source"], "upstream");
    assert_eq!(body["games"][0]["name"], "Hot Newcomer");
    assert_eq!(body["games"][0]["rating"], 90);
    assert_eq!(body["games"][1]["rank"], 2);
    assert_eq!(body["games"][1]["visits"], 0);
}

#[tokio::test]
async fn health_reports_ok() {
    let test = test_setup().await;

    let response = test.get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}

#[tokio::test]
async fn game_details_are_relayed() {
    let mut test = test_setup().await;
    let _places = test
        .server
        .mock("GET", "/v1/games/multiget-place-details")
        .match_query(Matcher::UrlEncoded("placeIds".into(), "920587237".into()))
        .with_status(200)
        .with_body(
            r#"[{"placeId": 920587237, "name": "Adopt Me!", "builder": "Uplift Games",
                 "universeId": 383310974, "isPlayable": true}]"#,
        )
        .create_async()
        .await;

    let response = test.get("/api/game/920587237").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body[0]["name"], "Adopt Me!");
    assert_eq!(body[0]["universeId"], 383310974);
    assert_eq!(body[0]["builder"], "Uplift Games");
}

#[tokio::test]
async fn game_details_failure_is_a_server_error() {
    let mut test = test_setup().await;
    let _upstream = test.with_upstream_down().await;

    let response = test.get("/api/game/920587237").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Failed to fetch game details");
}
