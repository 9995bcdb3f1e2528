#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use tokio::{net::TcpListener, sync::Mutex};

use musix::{
    spotify::{PlaylistSource, SpotifyError},
    store::{ExecutionLog, MemoryStore, SongStore, StoreError},
    types::{NewSong, PlaylistTrack, Song},
};

// Binds a fake upstream on an ephemeral port and returns its base URL
pub async fn bind() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    (listener, base)
}

pub fn serve(listener: TcpListener, router: Router) {
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
}

pub async fn spawn(router: Router) -> String {
    let (listener, base) = bind().await;
    serve(listener, router);
    base
}

pub fn song(week: &str, name: &str, artist: &str, spotify: Option<&str>, youtube: Option<&str>) -> Song {
    Song {
        week: week.to_string(),
        song_name: name.to_string(),
        artist: artist.to_string(),
        youtube_id: youtube.map(str::to_string),
        spotify_track_id: spotify.map(str::to_string),
    }
}

pub fn track(id: Option<&str>, name: &str, artist: &str) -> PlaylistTrack {
    PlaylistTrack {
        id: id.map(str::to_string),
        name: name.to_string(),
        artist: artist.to_string(),
    }
}

pub fn unavailable() -> StoreError {
    StoreError::Status {
        status: StatusCode::SERVICE_UNAVAILABLE,
        body: "upstream down".to_string(),
    }
}

/// Playlist that returns a fixed track list and counts fetches.
pub struct FakePlaylist {
    tracks: Vec<PlaylistTrack>,
    pub fetches: Mutex<usize>,
}

impl FakePlaylist {
    pub fn new(tracks: Vec<PlaylistTrack>) -> Self {
        Self {
            tracks,
            fetches: Mutex::new(0),
        }
    }
}

#[async_trait]
impl PlaylistSource for FakePlaylist {
    async fn fetch_playlist(&self, _playlist_id: &str) -> Result<Vec<PlaylistTrack>, SpotifyError> {
        *self.fetches.lock().await += 1;
        Ok(self.tracks.clone())
    }
}

/// Playlist whose API always answers 502.
pub struct BrokenPlaylist;

#[async_trait]
impl PlaylistSource for BrokenPlaylist {
    async fn fetch_playlist(&self, _playlist_id: &str) -> Result<Vec<PlaylistTrack>, SpotifyError> {
        Err(SpotifyError::Status {
            context: "API",
            status: StatusCode::BAD_GATEWAY,
            body: "bad gateway".to_string(),
        })
    }
}

/// Store and execution log that fail every call.
pub struct FailingStore;

#[async_trait]
impl SongStore for FailingStore {
    async fn list_songs(&self) -> Result<Vec<Song>, StoreError> {
        Err(unavailable())
    }

    async fn insert_song(&self, _song: &NewSong) -> Result<(), StoreError> {
        Err(unavailable())
    }

    async fn update_youtube_id(&self, _spotify: &str, _youtube: &str) -> Result<(), StoreError> {
        Err(unavailable())
    }
}

#[async_trait]
impl ExecutionLog for FailingStore {
    async fn purge_executions_before(&self, _cutoff: DateTime<Utc>) -> Result<(), StoreError> {
        Err(unavailable())
    }

    async fn executions_since(&self, _cutoff: DateTime<Utc>) -> Result<Vec<DateTime<Utc>>, StoreError> {
        Err(unavailable())
    }

    async fn record_execution(&self, _at: DateTime<Utc>) -> Result<(), StoreError> {
        Err(unavailable())
    }
}

/// In-memory store that rejects inserts for one Spotify track id.
pub struct RejectingStore {
    pub inner: Arc<MemoryStore>,
    pub reject_id: String,
}

#[async_trait]
impl SongStore for RejectingStore {
    async fn list_songs(&self) -> Result<Vec<Song>, StoreError> {
        self.inner.list_songs().await
    }

    async fn insert_song(&self, song: &NewSong) -> Result<(), StoreError> {
        if song.spotify_track_id.as_deref() == Some(self.reject_id.as_str()) {
            return Err(StoreError::Conflict("rejected".to_string()));
        }
        self.inner.insert_song(song).await
    }

    async fn update_youtube_id(&self, spotify: &str, youtube: &str) -> Result<(), StoreError> {
        self.inner.update_youtube_id(spotify, youtube).await
    }
}

// Minimal YouTube results page around a ytInitialData object
pub fn results_page(initial_data: &str) -> String {
    format!(
        "<html><head><script>var ytInitialData = {};</script></head><body></body></html>",
        initial_data
    )
}
