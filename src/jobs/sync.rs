use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;

use crate::{
    management::SongIndex,
    spotify::{PlaylistSource, SpotifyError},
    store::{SongStore, StoreError},
    types::{NewSong, PlaylistTrack, Song},
    utils,
};

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("failed to load existing songs: {0}")]
    Store(#[from] StoreError),
    #[error(transparent)]
    Spotify(#[from] SpotifyError),
    #[error("no week number left after week {0}")]
    WeekOverflow(u32),
}

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub added: usize,
    pub log: Vec<String>,
}

/// Aborted run. `log` holds everything written before the failure.
#[derive(Debug)]
pub struct SyncFailure {
    pub error: SyncError,
    pub log: Vec<String>,
}

/// Imports new playlist tracks into the archive with sequential week labels.
///
/// Runs are serialized: the lease is held from reading the archive until the
/// last insert, so two overlapping runs cannot hand out the same week.
pub struct PlaylistSync {
    store: Arc<dyn SongStore>,
    source: Arc<dyn PlaylistSource>,
    lease: Mutex<()>,
}

enum Decision<'a> {
    KnownId(&'a str),
    KnownSong(&'a Song),
    New,
}

impl PlaylistSync {
    pub fn new(store: Arc<dyn SongStore>, source: Arc<dyn PlaylistSource>) -> Self {
        Self {
            store,
            source,
            lease: Mutex::new(()),
        }
    }

    pub async fn run(&self, playlist_id: &str) -> Result<SyncReport, SyncFailure> {
        let _lease = self.lease.lock().await;
        let mut log: Vec<String> = Vec::new();

        let mut index = match self.store.list_songs().await {
            Ok(songs) => SongIndex::new(songs),
            Err(e) => return Err(fail(e.into(), log)),
        };
        log.push(format!(
            "Found {} existing songs with Spotify IDs in database",
            index.count_with_ids()
        ));
        log.push(format!(
            "Found {} total unique songs (by name+artist) in database",
            index.count_unique()
        ));
        log.push(format!("Max week number: {}", index.max_week()));

        log.push(format!("Fetching playlist tracks from playlist: {}", playlist_id));
        let tracks = match self.source.fetch_playlist(playlist_id).await {
            Ok(tracks) => tracks,
            Err(e) => return Err(fail(e.into(), log)),
        };
        log.push(format!("Found {} tracks in playlist", tracks.len()));

        // `None` once the week ordinal is exhausted; only fatal if a track needs it
        let mut next_week = index.max_week().checked_add(1);
        let mut added = 0;

        for track in tracks {
            let skip = match decide(&index, &track) {
                Decision::KnownId(id) => Some(format!(
                    "  Skipping (duplicate track ID): {} by {} ({})",
                    track.name, track.artist, id
                )),
                Decision::KnownSong(existing) => Some(format!(
                    "  Skipping (duplicate song): {} by {} (already exists as {} by {} in {})",
                    track.name, track.artist, existing.song_name, existing.artist, existing.week
                )),
                Decision::New => None,
            };
            if let Some(line) = skip {
                log.push(line);
                continue;
            }

            let Some(week) = next_week else {
                return Err(fail(SyncError::WeekOverflow(index.max_week()), log));
            };

            let song = NewSong {
                week: utils::format_week(week),
                song_name: track.name.clone(),
                artist: track.artist.clone(),
                youtube_id: None,
                spotify_track_id: track.id.clone(),
            };

            // a failed insert leaves `next_week` untouched
            match self.store.insert_song(&song).await {
                Ok(()) => {
                    log.push(format!(
                        "  Added: {} - {} by {} ({})",
                        song.week,
                        song.song_name,
                        song.artist,
                        display_id(&track)
                    ));
                    index.add(song.into());
                    added += 1;
                    next_week = week.checked_add(1);
                }
                Err(e) => log.push(format!(
                    "  Failed to add: {} by {} ({}): {}",
                    track.name,
                    track.artist,
                    display_id(&track),
                    e
                )),
            }
        }

        if added == 0 {
            log.push("No new songs to add!".to_string());
        } else {
            log.push(format!("Successfully added {} new song(s) to database!", added));
        }

        Ok(SyncReport { added, log })
    }
}

fn decide<'a>(index: &'a SongIndex, track: &'a PlaylistTrack) -> Decision<'a> {
    if let Some(id) = track.id.as_deref() {
        if index.by_id(id).is_some() {
            return Decision::KnownId(id);
        }
    }

    match index.by_key(&track.key()) {
        Some(existing) => Decision::KnownSong(existing),
        None => Decision::New,
    }
}

fn display_id(track: &PlaylistTrack) -> &str {
    track.id.as_deref().unwrap_or("local file")
}

fn fail(error: SyncError, mut log: Vec<String>) -> SyncFailure {
    log.push(format!("Error: {}", error));
    SyncFailure { error, log }
}
