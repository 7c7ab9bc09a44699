use axum::http::{header, StatusCode};

use crate::setup::{body_text, test_setup};

#[tokio::test]
async fn index_renders_top_playing_by_default() {
    let mut test = test_setup().await;
    let _upstream = test.with_upstream_down().await;

    let response = test.get("/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/html"));

    let html = body_text(response).await;
    assert!(html.contains("<h1>Top Playing Now</h1>"));
    assert!(html.contains(r#"href="/?category=trending&limit=50""#));
    assert!(html.contains("showing sample data"));
    assert!(html.contains("1st"));
    assert!(html.contains("50th"));
}

#[tokio::test]
async fn page_follows_category_and_limit() {
    let mut test = test_setup().await;
    let _upstream = test.with_upstream_down().await;

    let html = body_text(test.get("/?category=top-visited&limit=2").await).await;

    assert!(html.contains("<h1>Top Visited</h1>"));
    assert!(html.contains("Blox Fruits"));
    assert!(html.contains("2nd"));
    assert!(!html.contains("3rd"));
}

#[tokio::test]
async fn page_with_unknown_category_is_not_found() {
    let test = test_setup().await;

    let response = test.get("/?category=most-hated").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
