mod common;

use bioquest_service::services::providers::mock::MockChatProvider;
use common::{TestApp, TEST_API_KEY};
use reqwest::StatusCode;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn image_returns_first_regular_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/photos"))
        .and(query_param("query", "red blood cell"))
        .and(query_param("per_page", "1"))
        .and(header(
            "Authorization",
            format!("Client-ID {}", TEST_API_KEY).as_str(),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 2,
            "results": [
                { "urls": { "regular": "https://images.example/rbc.jpg", "thumb": "t" } },
                { "urls": { "regular": "https://images.example/other.jpg" } }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let app = TestApp::with_upstream(&server.uri()).await;
    let response = app.get("/image?topic=red%20blood%20cell").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["url"], "https://images.example/rbc.jpg");
}

#[tokio::test]
async fn image_with_no_results_returns_empty_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/photos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 0,
            "results": []
        })))
        .mount(&server)
        .await;

    let app = TestApp::with_upstream(&server.uri()).await;
    let response = app.get("/image?topic=zzzz").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["url"], "");
}

#[tokio::test]
async fn image_upstream_failure_is_bad_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/photos"))
        .respond_with(ResponseTemplate::new(401).set_body_string("OAuth error"))
        .mount(&server)
        .await;

    let app = TestApp::with_upstream(&server.uri()).await;
    let response = app.get("/image?topic=cells").await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("401"));
}

#[tokio::test]
async fn image_requires_topic() {
    let app = TestApp::with_mocks(
        Arc::new(MockChatProvider::replying("unused")),
        Some("https://images.example/x.jpg"),
        None,
    )
    .await;

    let response = app.get("/image").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn video_builds_watch_url_from_first_item() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/youtube/v3/search"))
        .and(query_param("part", "snippet"))
        .and(query_param("q", "dna replication"))
        .and(query_param("key", TEST_API_KEY))
        .and(query_param("type", "video"))
        .and(query_param("maxResults", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "kind": "youtube#searchListResponse",
            "items": [
                { "id": { "kind": "youtube#video", "videoId": "TNKWgcFPHqw" } }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let app = TestApp::with_upstream(&server.uri()).await;
    let response = app.get("/video?topic=dna%20replication").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["url"], "https://www.youtube.com/watch?v=TNKWgcFPHqw");
}

#[tokio::test]
async fn video_with_no_items_returns_empty_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/youtube/v3/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .mount(&server)
        .await;

    let app = TestApp::with_upstream(&server.uri()).await;
    let response = app.get("/video?topic=zzzz").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["url"], "");
}

#[tokio::test]
async fn video_with_missing_items_field_returns_empty_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/youtube/v3/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "pageInfo": {} })))
        .mount(&server)
        .await;

    let app = TestApp::with_upstream(&server.uri()).await;
    let response = app.get("/video?topic=zzzz").await;

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["url"], "");
}

#[tokio::test]
async fn mocked_video_provider_result_is_returned() {
    let app = TestApp::with_mocks(
        Arc::new(MockChatProvider::replying("unused")),
        None,
        Some("https://www.youtube.com/watch?v=abc"),
    )
    .await;

    let response = app.get("/video?topic=cells").await;
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["url"], "https://www.youtube.com/watch?v=abc");
}
