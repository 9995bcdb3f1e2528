mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{Router, response::Html, routing::get};

use musix::{
    jobs::{BackfillOutcome, ensure_latest_has_youtube_id},
    store::{MemoryStore, SongStore, StoreError},
    types::{BackfillResponse, NewSong, Song},
    utils,
    youtube::YouTubeClient,
};

use common::{FailingStore, results_page, song};

const ONE_VIDEO: &str =
    r#"{"contents":[{"videoRenderer":{"videoId":"yt-new","title":{"runs":[{"text":"Found"}]}}}]}"#;

async fn fake_youtube(initial_data: &'static str) -> YouTubeClient {
    let base = common::spawn(Router::new().route(
        "/results",
        get(move || async move { Html(results_page(initial_data)) }),
    ))
    .await;
    let http = utils::http_client(std::time::Duration::from_secs(5)).unwrap();
    YouTubeClient::new(http, &base)
}

/// Reads fine, refuses every write.
struct ReadOnlyStore(MemoryStore);

#[async_trait]
impl SongStore for ReadOnlyStore {
    async fn list_songs(&self) -> Result<Vec<Song>, StoreError> {
        self.0.list_songs().await
    }

    async fn insert_song(&self, _song: &NewSong) -> Result<(), StoreError> {
        Err(common::unavailable())
    }

    async fn update_youtube_id(&self, _spotify: &str, _youtube: &str) -> Result<(), StoreError> {
        Err(common::unavailable())
    }
}

#[tokio::test]
async fn test_updates_numerically_latest_song() {
    let youtube = fake_youtube(ONE_VIDEO).await;
    let store = MemoryStore::with_songs(vec![
        song("week 9", "Nine", "A", Some("t9"), None),
        song("week 10", "Ten", "B", Some("t10"), None),
    ]);

    let outcome = ensure_latest_has_youtube_id(&store, &youtube).await;

    assert_eq!(outcome, BackfillOutcome::Updated("yt-new".to_string()));
    assert_eq!(outcome.message(), "YouTube ID found and updated");

    let songs = store.list_songs().await.unwrap();
    assert_eq!(songs[0].week, "week 10");
    assert_eq!(songs[0].youtube_id.as_deref(), Some("yt-new"));
    assert_eq!(songs[1].youtube_id, None);

    // Second run is a no-op
    let again = ensure_latest_has_youtube_id(&store, &youtube).await;
    assert_eq!(again, BackfillOutcome::AlreadyPresent("yt-new".to_string()));
    assert!(again.is_success());
}

#[tokio::test]
async fn test_empty_archive() {
    let youtube = fake_youtube(ONE_VIDEO).await;

    let outcome = ensure_latest_has_youtube_id(&MemoryStore::new(), &youtube).await;

    let response = BackfillResponse::from(outcome);
    assert!(!response.success);
    assert_eq!(response.message, "No songs found");
    assert_eq!(response.youtube_id, None);
}

#[tokio::test]
async fn test_already_present() {
    let youtube = fake_youtube(ONE_VIDEO).await;
    let store = MemoryStore::with_songs(vec![song("week 01", "One", "A", Some("t1"), Some("yt-old"))]);

    let response = BackfillResponse::from(ensure_latest_has_youtube_id(&store, &youtube).await);

    assert!(response.success);
    assert_eq!(response.message, "Latest song already has YouTube ID");
    assert_eq!(response.youtube_id.as_deref(), Some("yt-old"));
}

#[tokio::test]
async fn test_missing_spotify_id() {
    let youtube = fake_youtube(ONE_VIDEO).await;
    let store = MemoryStore::with_songs(vec![song("week 01", "Demo", "A", None, None)]);

    let outcome = ensure_latest_has_youtube_id(&store, &youtube).await;

    assert_eq!(outcome, BackfillOutcome::MissingSpotifyId);
    assert!(!outcome.is_success());
}

#[tokio::test]
async fn test_no_video_found() {
    let youtube = fake_youtube(r#"{"contents":[]}"#).await;
    let store = MemoryStore::with_songs(vec![song("week 01", "Obscure", "Nobody", Some("t1"), None)]);

    let outcome = ensure_latest_has_youtube_id(&store, &youtube).await;

    assert_eq!(outcome.message(), "No YouTube video found for \"Obscure - Nobody\"");
    assert_eq!(store.list_songs().await.unwrap()[0].youtube_id, None);
}

#[tokio::test]
async fn test_update_failure() {
    let youtube = fake_youtube(ONE_VIDEO).await;
    let store = ReadOnlyStore(MemoryStore::with_songs(vec![song(
        "week 01", "One", "A", Some("t1"), None,
    )]));

    let response = BackfillResponse::from(ensure_latest_has_youtube_id(&store, &youtube).await);

    assert!(!response.success);
    assert_eq!(response.message, "Found YouTube ID but failed to update database");
}

#[tokio::test]
async fn test_store_unavailable() {
    let youtube = fake_youtube(ONE_VIDEO).await;

    let outcome = ensure_latest_has_youtube_id(&FailingStore, &youtube).await;

    assert_eq!(outcome, BackfillOutcome::StoreUnavailable);
}

#[tokio::test]
async fn test_shared_store_handle() {
    let youtube = fake_youtube(ONE_VIDEO).await;
    let store: Arc<dyn SongStore> = Arc::new(MemoryStore::with_songs(vec![song(
        "week 01", "One", "A", Some("t1"), None,
    )]));

    let outcome = ensure_latest_has_youtube_id(store.as_ref(), &youtube).await;
    assert_eq!(outcome.youtube_id(), Some("yt-new"));
}
