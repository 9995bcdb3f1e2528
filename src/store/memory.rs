use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::{
    store::{ExecutionLog, SongStore, StoreError},
    types::{NewSong, Song},
    utils,
};

/// Process-local store. Enforces the same uniqueness the `musix_songs` table
/// carries: one row per week label and per Spotify track id.
#[derive(Debug, Default)]
pub struct MemoryStore {
    songs: Mutex<Vec<Song>>,
    executions: Mutex<Vec<DateTime<Utc>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_songs(songs: Vec<Song>) -> Self {
        Self {
            songs: Mutex::new(songs),
            executions: Mutex::new(Vec::new()),
        }
    }

    pub fn with_executions(executions: Vec<DateTime<Utc>>) -> Self {
        Self {
            songs: Mutex::new(Vec::new()),
            executions: Mutex::new(executions),
        }
    }

    pub async fn execution_count(&self) -> usize {
        self.executions.lock().await.len()
    }
}

#[async_trait]
impl SongStore for MemoryStore {
    async fn list_songs(&self) -> Result<Vec<Song>, StoreError> {
        let mut songs = self.songs.lock().await.clone();
        utils::sort_songs_latest_first(&mut songs);
        Ok(songs)
    }

    async fn insert_song(&self, song: &NewSong) -> Result<(), StoreError> {
        let mut songs = self.songs.lock().await;

        if songs.iter().any(|s| s.week == song.week) {
            return Err(StoreError::Conflict(format!("week {:?} exists", song.week)));
        }
        if let Some(id) = &song.spotify_track_id {
            if songs.iter().any(|s| s.spotify_track_id.as_ref() == Some(id)) {
                return Err(StoreError::Conflict(format!("spotify track {} exists", id)));
            }
        }

        songs.push(song.clone().into());
        Ok(())
    }

    async fn update_youtube_id(
        &self,
        spotify_track_id: &str,
        youtube_id: &str,
    ) -> Result<(), StoreError> {
        let mut songs = self.songs.lock().await;
        for song in songs
            .iter_mut()
            .filter(|s| s.spotify_track_id.as_deref() == Some(spotify_track_id))
        {
            song.youtube_id = Some(youtube_id.to_string());
        }
        Ok(())
    }
}

#[async_trait]
impl ExecutionLog for MemoryStore {
    async fn purge_executions_before(&self, cutoff: DateTime<Utc>) -> Result<(), StoreError> {
        self.executions.lock().await.retain(|at| *at >= cutoff);
        Ok(())
    }

    async fn executions_since(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<DateTime<Utc>>, StoreError> {
        let mut executions: Vec<DateTime<Utc>> = self
            .executions
            .lock()
            .await
            .iter()
            .copied()
            .filter(|at| *at >= cutoff)
            .collect();
        executions.sort_by(|a, b| b.cmp(a));
        Ok(executions)
    }

    async fn record_execution(&self, at: DateTime<Utc>) -> Result<(), StoreError> {
        self.executions.lock().await.push(at);
        Ok(())
    }
}
