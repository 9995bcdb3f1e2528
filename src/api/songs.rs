use std::sync::Arc;

use axum::{Extension, http::StatusCode, response::Json};

use crate::{
    server::AppState,
    types::{
        AlbumArtResponse, ArchiveEntry, LatestSongResponse, SearchYouTubeRequest,
        SearchYouTubeResponse, Song,
    },
    warning,
};

async fn latest(state: &AppState) -> Option<Song> {
    match state.store.latest_song().await {
        Ok(song) => song,
        Err(e) => {
            warning!("Error fetching latest song: {}", e);
            None
        }
    }
}

/// `GET /api/musix/latest-song`. Always 200; fields are null when unknown.
pub async fn latest_song(Extension(state): Extension<Arc<AppState>>) -> Json<LatestSongResponse> {
    let Some(song) = latest(&state).await else {
        return Json(LatestSongResponse::default());
    };

    Json(LatestSongResponse {
        song_name: Some(song.song_name),
        artist: Some(song.artist),
        spotify_track_id: song.spotify_track_id,
        youtube_id: song.youtube_id,
    })
}

/// `GET /api/musix/album-art`. Always 200; Last.fm failures only null the art.
pub async fn album_art(Extension(state): Extension<Arc<AppState>>) -> Json<AlbumArtResponse> {
    let Some(song) = latest(&state).await else {
        return Json(AlbumArtResponse::default());
    };

    let art = match &state.lastfm {
        Some(lastfm) => lastfm.album_art(&song.song_name, &song.artist).await,
        None => {
            warning!("LASTFM_API_KEY not found in environment variables - album art will not be fetched");
            Default::default()
        }
    };

    Json(AlbumArtResponse {
        song_name: Some(song.song_name),
        artist: Some(song.artist),
        album_art: art.album_art,
        album_name: art.album_name,
    })
}

/// `POST /api/musix/search-youtube` with `{songName, artist}`.
pub async fn search_youtube(
    Extension(state): Extension<Arc<AppState>>,
    Json(request): Json<SearchYouTubeRequest>,
) -> (StatusCode, Json<SearchYouTubeResponse>) {
    let (Some(song_name), Some(artist)) = (
        request.song_name.filter(|s| !s.trim().is_empty()),
        request.artist.filter(|s| !s.trim().is_empty()),
    ) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(SearchYouTubeResponse {
                success: false,
                youtube_id: None,
                title: None,
                message: Some("songName and artist are required".to_string()),
            }),
        );
    };

    let response = match state.youtube.find_video(&song_name, &artist).await {
        Some(video) => SearchYouTubeResponse {
            success: true,
            youtube_id: Some(video.id),
            title: video.title,
            message: None,
        },
        None => SearchYouTubeResponse {
            success: false,
            youtube_id: None,
            title: None,
            message: Some("No YouTube video found".to_string()),
        },
    };
    (StatusCode::OK, Json(response))
}

/// `GET /api/musix/songs`: the weekly archive, latest first.
pub async fn songs(Extension(state): Extension<Arc<AppState>>) -> Json<Vec<ArchiveEntry>> {
    match state.store.list_songs().await {
        Ok(songs) => Json(songs.into_iter().map(ArchiveEntry::from).collect()),
        Err(e) => {
            warning!("Error fetching songs: {}", e);
            Json(Vec::new())
        }
    }
}
