//! # Spotify Integration Module
//!
//! Reads the weekly-picks playlist from the Spotify Web API. Only the
//! client-credentials flow is used: the playlist is public, so no user
//! authorization, refresh tokens, or callback server are involved.
//!
//! ## Architecture
//!
//! ```text
//! Playlist Sync (jobs)
//!          ↓
//! PlaylistSource trait
//!          ↓
//! SpotifyClient
//!     ├── auth      (POST /api/token, client_credentials)
//!     └── playlist  (GET /playlists/{id}/tracks, `next` pagination)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! ## Error Handling
//!
//! Every non-2xx answer is a [`SpotifyError::Status`] carrying the response
//! body. Nothing is retried here: a failed page aborts the whole sync run,
//! which reports the partial log to the caller.

pub mod auth;
pub mod playlist;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::{config::SpotifyCredentials, types::PlaylistTrack};

#[derive(Debug, Error)]
pub enum SpotifyError {
    #[error("Spotify request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Spotify {context} error: {status} {body}")]
    Status {
        context: &'static str,
        status: StatusCode,
        body: String,
    },
    #[error("malformed Spotify payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Source of the ordered track list the sync imports from.
#[async_trait]
pub trait PlaylistSource: Send + Sync {
    async fn fetch_playlist(&self, playlist_id: &str) -> Result<Vec<PlaylistTrack>, SpotifyError>;
}

#[derive(Clone)]
pub struct SpotifyClient {
    client: Client,
    accounts_url: String,
    api_url: String,
    credentials: SpotifyCredentials,
}

impl SpotifyClient {
    pub fn new(
        client: Client,
        accounts_url: &str,
        api_url: &str,
        credentials: SpotifyCredentials,
    ) -> Self {
        Self {
            client,
            accounts_url: accounts_url.trim_end_matches('/').to_string(),
            api_url: api_url.trim_end_matches('/').to_string(),
            credentials,
        }
    }
}

#[async_trait]
impl PlaylistSource for SpotifyClient {
    async fn fetch_playlist(&self, playlist_id: &str) -> Result<Vec<PlaylistTrack>, SpotifyError> {
        let token = self.access_token().await?;
        self.playlist_tracks(&token, playlist_id).await
    }
}
