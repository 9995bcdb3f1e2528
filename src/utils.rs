use std::{cmp::Ordering, time::Duration};

use reqwest::{Client, Url};

use crate::types::{Song, SongTableRow, SpotifyArtist};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Renders a week ordinal as a label, zero-padded to two digits.
pub fn format_week(week: u32) -> String {
    format!("week {:02}", week)
}

/// Extracts the first run of ASCII digits from a week label.
///
/// Labels without digits (or with a number too large for `u32`) parse as `0`.
pub fn parse_week_number(week: &str) -> u32 {
    let digits: String = week
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

/// Highest week ordinal among `songs`, `0` for an empty archive.
pub fn max_week(songs: &[Song]) -> u32 {
    songs.iter().map(Song::week_number).max().unwrap_or(0)
}

/// Latest first by week ordinal, label text breaking ties.
pub fn sort_songs_latest_first(songs: &mut [Song]) {
    songs.sort_by(|a, b| match b.week_number().cmp(&a.week_number()) {
        Ordering::Equal => b.week.cmp(&a.week),
        other => other,
    });
}

pub fn join_artists(artists: &[SpotifyArtist]) -> String {
    artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// First entry of a comma-separated artist list, trimmed.
pub fn first_artist(artist: &str) -> &str {
    artist.split(',').next().unwrap_or(artist).trim()
}

pub fn has_multiple_artists(artist: &str) -> bool {
    artist.contains(',')
}

/// Link used by the archive: the Spotify track when known, a Spotify search
/// for legacy rows imported from YouTube, nothing otherwise.
pub fn spotify_link(song: &Song) -> Option<String> {
    if let Some(id) = &song.spotify_track_id {
        return Some(format!("https://open.spotify.com/track/{}", id));
    }

    song.youtube_id.as_ref()?;

    let mut url = Url::parse("https://open.spotify.com/search/").ok()?;
    url.path_segments_mut()
        .ok()?
        .pop_if_empty()
        .push(&format!("{} {}", song.song_name, song.artist));
    Some(url.to_string())
}

/// Builds the shared HTTP client. Every upstream call is bounded by `timeout`.
pub fn http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
}

pub fn song_table_rows(songs: Vec<Song>) -> Vec<SongTableRow> {
    songs
        .into_iter()
        .map(|s| SongTableRow {
            week: s.week,
            song: s.song_name,
            artist: s.artist,
            youtube: s.youtube_id.unwrap_or_else(|| "-".to_string()),
        })
        .collect()
}

pub fn filter_songs(songs: &mut Vec<Song>, search: &str) {
    let search_term = search.trim().to_lowercase();
    songs.retain(|s| {
        s.song_name.to_lowercase().contains(&search_term)
            || s.artist.to_lowercase().contains(&search_term)
    });
}
