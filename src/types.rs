use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::utils;

/// A weekly pick as stored in the `musix_songs` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub week: String,
    pub song_name: String,
    pub artist: String,
    pub youtube_id: Option<String>,
    pub spotify_track_id: Option<String>,
}

impl Song {
    /// Numeric ordinal of the week label, `0` when the label carries no digits.
    pub fn week_number(&self) -> u32 {
        utils::parse_week_number(&self.week)
    }

    pub fn key(&self) -> SongKey {
        SongKey::new(&self.song_name, &self.artist)
    }
}

/// Row inserted by the sync pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSong {
    pub week: String,
    pub song_name: String,
    pub artist: String,
    pub youtube_id: Option<String>,
    pub spotify_track_id: Option<String>,
}

impl From<NewSong> for Song {
    fn from(song: NewSong) -> Self {
        Song {
            week: song.week,
            song_name: song.song_name,
            artist: song.artist,
            youtube_id: song.youtube_id,
            spotify_track_id: song.spotify_track_id,
        }
    }
}

/// Normalized `(song name, artist)` identity used to catch duplicates that
/// have no Spotify track id.
///
/// Both parts are trimmed of surrounding whitespace and lower-cased with
/// Unicode case mapping. Interior whitespace is kept as is. The rendered key
/// is `"{song}|{artist}"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SongKey(String);

impl SongKey {
    pub fn new(song_name: &str, artist: &str) -> Self {
        SongKey(format!(
            "{}|{}",
            song_name.trim().to_lowercase(),
            artist.trim().to_lowercase()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SongKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Track as it appears in the source playlist, in playlist order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistTrack {
    /// `None` for local files, which Spotify lists without an id.
    pub id: Option<String>,
    pub name: String,
    pub artist: String,
}

impl PlaylistTrack {
    pub fn key(&self) -> SongKey {
        SongKey::new(&self.name, &self.artist)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumArt {
    pub album_art: Option<String>,
    pub album_name: Option<String>,
}

impl AlbumArt {
    pub fn is_usable(&self) -> bool {
        self.album_art.is_some() || self.album_name.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoResult {
    pub id: String,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub remaining: u32,
}

// Supabase rows

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SongRow {
    pub week: String,
    pub song_name: String,
    pub artist: String,
    pub youtube_id: Option<String>,
    pub spotify_track_id: Option<String>,
}

impl From<SongRow> for Song {
    fn from(row: SongRow) -> Self {
        Song {
            week: row.week,
            song_name: row.song_name,
            artist: row.artist,
            youtube_id: row.youtube_id.filter(|id| !id.is_empty()),
            spotify_track_id: row.spotify_track_id.filter(|id| !id.is_empty()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionRow {
    pub executed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct YoutubeIdPatch<'a> {
    pub youtube_id: &'a str,
}

// Spotify payloads

#[derive(Debug, Clone, Deserialize)]
pub struct ClientCredentialsToken {
    pub access_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistTracksPage {
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<SpotifyTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyTrack {
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<SpotifyArtist>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyArtist {
    pub name: String,
}

// Last.fm payloads

#[derive(Debug, Clone, Deserialize)]
pub struct LastFmImage {
    #[serde(rename = "#text", default)]
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LastFmTrackInfoResponse {
    pub track: Option<LastFmTrack>,
    pub error: Option<i64>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LastFmTrack {
    pub album: Option<LastFmAlbum>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LastFmAlbum {
    pub title: Option<String>,
    #[serde(default)]
    pub image: Vec<LastFmImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LastFmSearchResponse {
    pub results: Option<LastFmSearchResults>,
    pub error: Option<i64>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LastFmSearchResults {
    pub trackmatches: Option<LastFmTrackMatches>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LastFmTrackMatches {
    #[serde(default)]
    pub track: Vec<LastFmTrackMatch>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LastFmTrackMatch {
    #[serde(default)]
    pub image: Vec<LastFmImage>,
}

// HTTP API payloads

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResponse {
    pub success: bool,
    pub message: String,
    pub output: Vec<String>,
    pub remaining: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackfillResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestSongResponse {
    pub song_name: Option<String>,
    pub artist: Option<String>,
    pub spotify_track_id: Option<String>,
    pub youtube_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumArtResponse {
    pub song_name: Option<String>,
    pub artist: Option<String>,
    pub album_art: Option<String>,
    pub album_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchYouTubeRequest {
    pub song_name: Option<String>,
    pub artist: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchYouTubeResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveEntry {
    pub week: String,
    pub song_name: String,
    pub artist: String,
    pub youtube_id: Option<String>,
    pub spotify_track_id: Option<String>,
    pub link: Option<String>,
}

impl From<Song> for ArchiveEntry {
    fn from(song: Song) -> Self {
        let link = utils::spotify_link(&song);
        ArchiveEntry {
            week: song.week,
            song_name: song.song_name,
            artist: song.artist,
            youtube_id: song.youtube_id,
            spotify_track_id: song.spotify_track_id,
            link,
        }
    }
}

#[derive(Tabled)]
pub struct SongTableRow {
    pub week: String,
    pub song: String,
    pub artist: String,
    pub youtube: String,
}
