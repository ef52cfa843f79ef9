mod common;

use axum::{Router, routing::post};
use axum_test::TestServer;
use link_mapper::api::handlers::shorten_handler;
use link_mapper::domain::repositories::LinkRepository;
use serde_json::json;

fn server(state: link_mapper::AppState) -> TestServer {
    let app = Router::new()
        .route("/api/shorten", post(shorten_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_shorten_generates_code() {
    let (state, _repo, _rx) = common::create_test_state();
    let server = server(state);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    assert_eq!(response.status_code(), 201);

    let json = response.json::<serde_json::Value>();
    let code = json["code"].as_str().unwrap();
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(json["short_url"], format!("{}/{}", common::BASE_URL, code));
    assert_eq!(json["destination_url"], "https://example.com");
    assert_eq!(json["domain"], "example.com");
    assert_eq!(json["click_count"], 0);
    assert_eq!(json["is_custom_alias"], false);
    assert_eq!(json["created"], true);
}

#[tokio::test]
async fn test_shorten_with_alias() {
    let (state, repo, _rx) = common::create_test_state();
    let server = server(state);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com/page", "alias": "mylink" }))
        .await;

    assert_eq!(response.status_code(), 201);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["code"], "mylink");
    assert_eq!(json["click_count"], 0);
    assert_eq!(json["is_custom_alias"], true);

    let stored = repo.get("mylink").await.unwrap().unwrap();
    assert_eq!(stored.destination_url, "https://example.com/page");
}

#[tokio::test]
async fn test_shorten_same_url_reuses_code() {
    let (state, _repo, _rx) = common::create_test_state();
    let server = server(state);

    let first = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com/dedup" }))
        .await;
    assert_eq!(first.status_code(), 201);

    let second = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com/dedup" }))
        .await;
    second.assert_status_ok();

    let first = first.json::<serde_json::Value>();
    let second = second.json::<serde_json::Value>();
    assert_eq!(first["code"], second["code"]);
    assert_eq!(second["created"], false);
}

#[tokio::test]
async fn test_shorten_alias_taken() {
    let (state, repo, _rx) = common::create_test_state();
    common::create_test_link(&repo, "abc", "https://one.com").await;
    let server = server(state);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://two.com", "alias": "abc" }))
        .await;

    assert_eq!(response.status_code(), 409);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "alias_taken");
}

#[tokio::test]
async fn test_shorten_invalid_url() {
    let (state, _repo, _rx) = common::create_test_state();
    let server = server(state);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "not-a-url" }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "invalid_destination");
}

#[tokio::test]
async fn test_shorten_invalid_alias() {
    let (state, _repo, _rx) = common::create_test_state();
    let server = server(state);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://x.com", "alias": "a!b" }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "invalid_alias");
}

#[tokio::test]
async fn test_shorten_bad_destination_reported_before_bad_alias() {
    let (state, _repo, _rx) = common::create_test_state();
    let server = server(state);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "ftp://x.com", "alias": "a!b" }))
        .await;

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "invalid_destination");
}

#[tokio::test]
async fn test_shorten_empty_alias_generates_code() {
    let (state, _repo, _rx) = common::create_test_state();
    let server = server(state);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com/empty-alias", "alias": "" }))
        .await;

    assert_eq!(response.status_code(), 201);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["is_custom_alias"], false);
}

#[tokio::test]
async fn test_shorten_missing_url_field() {
    let (state, _repo, _rx) = common::create_test_state();
    let server = server(state);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "alias": "lonely" }))
        .await;

    assert!(response.status_code().is_client_error());
}

#[tokio::test]
async fn test_shorten_empty_url_is_invalid_destination() {
    let (state, repo, _rx) = common::create_test_state();
    let server = server(state);

    for url in ["", "   "] {
        let response = server
            .post("/api/shorten")
            .json(&json!({ "url": url }))
            .await;

        response.assert_status_bad_request();
        let json = response.json::<serde_json::Value>();
        assert_eq!(json["error"]["code"], "invalid_destination");
    }

    assert_eq!(repo.count_all().await.unwrap().total_links, 0);
}

#[tokio::test]
async fn test_shorten_overlong_url_is_invalid_destination() {
    let (state, _repo, _rx) = common::create_test_state();
    let server = server(state);

    let prefix = "https://example.com/";
    let url = format!("{prefix}{}", "a".repeat(2049 - prefix.len()));
    assert_eq!(url.len(), 2049);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": url, "alias": "bad!alias" }))
        .await;

    response.assert_status_bad_request();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "invalid_destination");
}
