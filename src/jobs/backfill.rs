use crate::{store::SongStore, types::BackfillResponse, warning, youtube::YouTubeClient};

/// What happened to the latest song's YouTube id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackfillOutcome {
    NoSongs,
    AlreadyPresent(String),
    MissingSpotifyId,
    NotFound { song_name: String, artist: String },
    Updated(String),
    UpdateFailed(String),
    StoreUnavailable,
}

impl BackfillOutcome {
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            BackfillOutcome::AlreadyPresent(_) | BackfillOutcome::Updated(_)
        )
    }

    pub fn youtube_id(&self) -> Option<&str> {
        match self {
            BackfillOutcome::AlreadyPresent(id) | BackfillOutcome::Updated(id) => Some(id.as_str()),
            _ => None,
        }
    }

    pub fn message(&self) -> String {
        match self {
            BackfillOutcome::NoSongs => "No songs found".to_string(),
            BackfillOutcome::AlreadyPresent(_) => "Latest song already has YouTube ID".to_string(),
            BackfillOutcome::MissingSpotifyId => {
                "Latest song has no Spotify track ID to search with".to_string()
            }
            BackfillOutcome::NotFound { song_name, artist } => {
                format!("No YouTube video found for \"{} - {}\"", song_name, artist)
            }
            BackfillOutcome::Updated(_) => "YouTube ID found and updated".to_string(),
            BackfillOutcome::UpdateFailed(_) => {
                "Found YouTube ID but failed to update database".to_string()
            }
            BackfillOutcome::StoreUnavailable => "Could not read songs from database".to_string(),
        }
    }
}

impl From<BackfillOutcome> for BackfillResponse {
    fn from(outcome: BackfillOutcome) -> Self {
        BackfillResponse {
            success: outcome.is_success(),
            message: outcome.message(),
            youtube_id: outcome.youtube_id().map(str::to_string),
        }
    }
}

/// Fills in the YouTube id of the latest song, if it lacks one.
///
/// Touches at most one row and can be re-run at any time.
pub async fn ensure_latest_has_youtube_id(
    store: &dyn SongStore,
    youtube: &YouTubeClient,
) -> BackfillOutcome {
    let latest = match store.latest_song().await {
        Ok(Some(song)) => song,
        Ok(None) => return BackfillOutcome::NoSongs,
        Err(e) => {
            warning!("Failed to read latest song: {}", e);
            return BackfillOutcome::StoreUnavailable;
        }
    };

    if let Some(id) = latest.youtube_id {
        return BackfillOutcome::AlreadyPresent(id);
    }

    let Some(spotify_track_id) = latest.spotify_track_id else {
        return BackfillOutcome::MissingSpotifyId;
    };

    let Some(video) = youtube.find_video(&latest.song_name, &latest.artist).await else {
        return BackfillOutcome::NotFound {
            song_name: latest.song_name,
            artist: latest.artist,
        };
    };

    match store.update_youtube_id(&spotify_track_id, &video.id).await {
        Ok(()) => BackfillOutcome::Updated(video.id),
        Err(e) => {
            warning!("Failed to update YouTube ID for {}: {}", spotify_track_id, e);
            BackfillOutcome::UpdateFailed(video.id)
        }
    }
}
