mod common;

use std::{collections::HashMap, sync::Arc};

use axum::{
    Extension, Router,
    extract::Query,
    http::StatusCode,
    response::Html,
    routing::get,
};
use serde_json::json;
use tokio::sync::Mutex;

use musix::{
    utils,
    youtube::{self, YouTubeClient, YouTubeError},
};

use common::results_page;

type Queries = Arc<Mutex<Vec<HashMap<String, String>>>>;

const RESULTS: &str = r#"{
  "contents": { "twoColumnSearchResultsRenderer": { "primaryContents": { "sectionListRenderer": { "contents": [
    { "itemSectionRenderer": { "contents": [
      { "shelfRenderer": { "title": { "simpleText": "People also watched" } } },
      { "videoRenderer": { "videoId": "abc123", "title": { "runs": [ { "text": "Song - Artist (Official Video)" } ] } } },
      { "videoRenderer": { "videoId": "zzz999", "title": { "runs": [ { "text": "Cover" } ] } } }
    ] } }
  ] } } } }
}"#;

async fn results(
    Extension(queries): Extension<Queries>,
    Query(query): Query<HashMap<String, String>>,
) -> Html<String> {
    let search = query.get("search_query").cloned().unwrap_or_default();
    queries.lock().await.push(query);

    if search.contains("Nothing") {
        return Html(results_page(r#"{ "contents": {} }"#));
    }
    Html(results_page(RESULTS))
}

async fn failing() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "oops")
}

fn client(base: &str) -> YouTubeClient {
    let http = utils::http_client(std::time::Duration::from_secs(5)).unwrap();
    YouTubeClient::new(http, base)
}

#[test]
fn test_initial_data_stops_at_object_end() {
    let html = format!(
        "<script>window.x = 1;</script><script>var ytInitialData = {};</script><script>var other = {{}};</script>",
        r#"{"a": {"b": "};</script>"}}"#
    );

    let data = youtube::initial_data(&html).unwrap();
    assert_eq!(data, json!({ "a": { "b": "};</script>" } }));
}

#[test]
fn test_initial_data_missing() {
    let err = youtube::initial_data("<html><body>consent required</body></html>").unwrap_err();
    assert!(matches!(err, YouTubeError::MissingInitialData));
}

#[test]
fn test_first_video_in_document_order() {
    let data: serde_json::Value = serde_json::from_str(RESULTS).unwrap();

    let video = youtube::first_video(&data).unwrap();
    assert_eq!(video.id, "abc123");
    assert_eq!(video.title.as_deref(), Some("Song - Artist (Official Video)"));
}

#[test]
fn test_first_video_simple_text_title() {
    let data = json!({ "items": [ { "videoRenderer": { "videoId": "v1", "title": { "simpleText": "Plain" } } } ] });
    let video = youtube::first_video(&data).unwrap();
    assert_eq!(video.title.as_deref(), Some("Plain"));

    // A renderer without a videoId is not a result
    let data = json!({ "videoRenderer": { "title": { "simpleText": "Ad" } } });
    assert_eq!(youtube::first_video(&data), None);
}

#[tokio::test]
async fn test_find_video() {
    let queries: Queries = Arc::new(Mutex::new(Vec::new()));
    let base = common::spawn(
        Router::new()
            .route("/results", get(results))
            .layer(Extension(queries.clone())),
    )
    .await;

    let video = client(&base).find_video("Song", "Artist").await.unwrap();
    assert_eq!(video.id, "abc123");

    let queries = queries.lock().await;
    assert_eq!(queries[0].get("search_query").map(String::as_str), Some("Song - Artist"));
    assert_eq!(queries[0].get("sp").map(String::as_str), Some("EgIQAQ=="));
}

#[tokio::test]
async fn test_find_video_no_results() {
    let queries: Queries = Arc::new(Mutex::new(Vec::new()));
    let base = common::spawn(
        Router::new()
            .route("/results", get(results))
            .layer(Extension(queries)),
    )
    .await;

    assert_eq!(client(&base).find_video("Nothing", "Here").await, None);
}

#[tokio::test]
async fn test_server_error() {
    let base = common::spawn(Router::new().route("/results", get(failing))).await;
    let youtube = client(&base);

    assert!(matches!(
        youtube.search("Song - Artist").await,
        Err(YouTubeError::Status(status)) if status == StatusCode::INTERNAL_SERVER_ERROR
    ));
    assert_eq!(youtube.find_video("Song", "Artist").await, None);
}
