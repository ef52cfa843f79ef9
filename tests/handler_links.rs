mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use link_mapper::api::handlers::recent_links_handler;

fn server(state: link_mapper::AppState) -> TestServer {
    let app = Router::new()
        .route("/api/links", get(recent_links_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_recent_links_empty() {
    let (state, _repo, _rx) = common::create_test_state();
    let server = server(state);

    let response = server.get("/api/links").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["limit"], 10);
    assert_eq!(json["items"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_recent_links_newest_first() {
    let (state, repo, _rx) = common::create_test_state();
    common::create_test_link(&repo, "older", "https://example.com/1").await;
    common::create_test_link(&repo, "newer", "https://example.com/2").await;
    let server = server(state);

    let response = server.get("/api/links").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    let items = json["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["code"], "newer");
    assert_eq!(items[1]["code"], "older");
    assert_eq!(items[0]["short_url"], format!("{}/newer", common::BASE_URL));
    assert!(items[0]["last_accessed_at"].is_null());
}

#[tokio::test]
async fn test_recent_links_limit() {
    let (state, repo, _rx) = common::create_test_state();
    for i in 0..5 {
        common::create_test_link(&repo, &format!("code{i}"), &format!("https://example.com/{i}"))
            .await;
    }
    let server = server(state);

    let response = server.get("/api/links").add_query_param("limit", 2).await;

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["limit"], 2);
    assert_eq!(json["items"].as_array().unwrap().len(), 2);
    assert_eq!(json["items"][0]["code"], "code4");
}

#[tokio::test]
async fn test_recent_links_limit_is_clamped() {
    let (state, _repo, _rx) = common::create_test_state();
    let server = server(state);

    let response = server.get("/api/links").add_query_param("limit", 500).await;
    assert_eq!(response.json::<serde_json::Value>()["limit"], 100);

    let response = server.get("/api/links").add_query_param("limit", 0).await;
    assert_eq!(response.json::<serde_json::Value>()["limit"], 1);
}

#[tokio::test]
async fn test_recent_links_invalid_limit() {
    let (state, _repo, _rx) = common::create_test_state();
    let server = server(state);

    let response = server.get("/api/links").add_query_param("limit", "ten").await;

    response.assert_status_bad_request();
}
