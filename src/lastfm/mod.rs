//! Last.fm album art lookup.
//!
//! The widget only needs a cover image and, when available, the album title
//! for the latest pick. Lookups go through a fallback chain because Last.fm
//! rarely matches combined artist credits such as `"A, B"`:
//!
//! 1. `track.getInfo` with the full artist string
//! 2. `track.getInfo` with the first artist, only for comma-separated artists
//! 3. `track.search` for `"{song} {first artist}"`, which carries art but no
//!    album title
//!
//! [`LastFmClient::album_art`] never fails. Every error ends the chain step
//! it happened in and the final fallback degrades to empty [`AlbumArt`].

use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::{
    info,
    types::{AlbumArt, LastFmImage, LastFmSearchResponse, LastFmTrackInfoResponse},
    utils, warning,
};

#[derive(Debug, Error)]
pub enum LastFmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP status {status}: {body}")]
    HttpStatus { status: StatusCode, body: String },
    #[error("Last.fm API error {code}: {message}")]
    Api { code: i64, message: String },
    #[error("Deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),
    #[error("Missing expected field: {0}")]
    MissingField(&'static str),
}

#[derive(Clone)]
pub struct LastFmClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl LastFmClient {
    pub fn new(client: Client, api_key: String, base_url: &str) -> Self {
        Self {
            client,
            api_key,
            base_url: base_url.to_string(),
        }
    }

    /// Resolves album art for a track, walking the fallback chain.
    pub async fn album_art(&self, song_name: &str, artist: &str) -> AlbumArt {
        match self.track_info(song_name, artist).await {
            Ok(art) if art.is_usable() => return art,
            Ok(_) => {}
            Err(e) => warning!("Last.fm track.getInfo failed for {} by {}: {}", song_name, artist, e),
        }

        if utils::has_multiple_artists(artist) {
            let first = utils::first_artist(artist);
            info!("Trying Last.fm with first artist only: {}", first);
            match self.track_info(song_name, first).await {
                Ok(art) if art.is_usable() => return art,
                Ok(_) => {}
                Err(e) => warning!("Last.fm track.getInfo failed for {} by {}: {}", song_name, first, e),
            }
        }

        match self.search_art(song_name, artist).await {
            Ok(art) => art,
            Err(e) => {
                warning!("Last.fm track.search failed for {} by {}: {}", song_name, artist, e);
                AlbumArt::default()
            }
        }
    }

    /// `track.getInfo` for one artist string.
    ///
    /// An album without images still yields its title. A missing track or
    /// album is an error so the caller can move on to the next strategy.
    pub async fn track_info(&self, song_name: &str, artist: &str) -> Result<AlbumArt, LastFmError> {
        let params = [
            ("method", "track.getInfo"),
            ("api_key", self.api_key.as_str()),
            ("artist", artist),
            ("track", song_name),
            ("format", "json"),
        ];

        let body = self.get(&params).await?;
        let data: LastFmTrackInfoResponse = serde_json::from_str(&body)?;

        if let Some(code) = data.error {
            return Err(LastFmError::Api {
                code,
                message: data.message.unwrap_or_default(),
            });
        }

        let track = data.track.ok_or(LastFmError::MissingField("track"))?;
        let album = track.album.ok_or(LastFmError::MissingField("track.album"))?;

        Ok(AlbumArt {
            album_art: largest_image(&album.image),
            album_name: album.title.filter(|t| !t.is_empty()),
        })
    }

    /// `track.search` fallback. Search matches carry no album title, only art.
    pub async fn search_art(&self, song_name: &str, artist: &str) -> Result<AlbumArt, LastFmError> {
        let query = format!("{} {}", song_name, utils::first_artist(artist));
        let params = [
            ("method", "track.search"),
            ("api_key", self.api_key.as_str()),
            ("track", query.as_str()),
            ("format", "json"),
            ("limit", "5"),
        ];

        let body = self.get(&params).await?;
        let data: LastFmSearchResponse = serde_json::from_str(&body)?;

        if let Some(code) = data.error {
            return Err(LastFmError::Api {
                code,
                message: data.message.unwrap_or_default(),
            });
        }

        let top = data
            .results
            .and_then(|r| r.trackmatches)
            .and_then(|m| m.track.into_iter().next())
            .ok_or(LastFmError::MissingField("results.trackmatches.track"))?;

        Ok(AlbumArt {
            album_art: largest_image(&top.image),
            album_name: None,
        })
    }

    async fn get(&self, params: &[(&str, &str)]) -> Result<String, LastFmError> {
        let response = self.client.get(&self.base_url).query(params).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(LastFmError::HttpStatus { status, body });
        }
        Ok(body)
    }
}

/// Last.fm lists images smallest first; empty URLs mean "no image".
fn largest_image(images: &[LastFmImage]) -> Option<String> {
    images
        .last()
        .map(|image| image.url.clone())
        .filter(|url| !url.is_empty())
}
