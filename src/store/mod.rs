//! # Row Store Gateway
//!
//! Thin persistence layer for the two tables the service owns:
//!
//! - `musix_songs` - one row per weekly pick
//! - `musix_rate_limit` - one timestamp per admitted sync run
//!
//! Callers talk to the [`SongStore`] and [`ExecutionLog`] traits. Two backends
//! implement both: [`SupabaseStore`] (PostgREST over HTTP) for production and
//! [`MemoryStore`] for local runs without credentials and for tests.

mod memory;
mod supabase;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use thiserror::Error;

use crate::types::{NewSong, Song};

pub use memory::MemoryStore;
pub use supabase::SupabaseStore;

pub const SONGS_TABLE: &str = "musix_songs";
pub const RATE_LIMIT_TABLE: &str = "musix_rate_limit";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("store returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("conflicting row: {0}")]
    Conflict(String),
    #[error("malformed store payload: {0}")]
    Decode(#[from] serde_json::Error),
}

#[async_trait]
pub trait SongStore: Send + Sync {
    /// All rows, latest week first.
    async fn list_songs(&self) -> Result<Vec<Song>, StoreError>;

    async fn insert_song(&self, song: &NewSong) -> Result<(), StoreError>;

    /// Sets `youtube_id` on the row(s) carrying `spotify_track_id`.
    async fn update_youtube_id(
        &self,
        spotify_track_id: &str,
        youtube_id: &str,
    ) -> Result<(), StoreError>;

    async fn latest_song(&self) -> Result<Option<Song>, StoreError> {
        Ok(self.list_songs().await?.into_iter().next())
    }
}

#[async_trait]
pub trait ExecutionLog: Send + Sync {
    /// Deletes executions strictly older than `cutoff`.
    async fn purge_executions_before(&self, cutoff: DateTime<Utc>) -> Result<(), StoreError>;

    /// Executions at or after `cutoff`, newest first.
    async fn executions_since(&self, cutoff: DateTime<Utc>)
    -> Result<Vec<DateTime<Utc>>, StoreError>;

    async fn record_execution(&self, at: DateTime<Utc>) -> Result<(), StoreError>;
}
