//! Keyless YouTube video search.
//!
//! The results page embeds its data as a `ytInitialData` JSON object. The
//! first `videoRenderer` found in it is the top video result. No API key or
//! quota is involved.

use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;

use crate::{types::VideoResult, warning};

/// `sp` filter restricting results to videos.
const VIDEO_FILTER: &str = "EgIQAQ==";
const INITIAL_DATA_MARKERS: [&str; 2] = ["var ytInitialData = ", "ytInitialData = "];
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

#[derive(Debug, Error)]
pub enum YouTubeError {
    #[error("YouTube request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("YouTube returned {0}")]
    Status(StatusCode),
    #[error("results page carries no ytInitialData")]
    MissingInitialData,
    #[error("malformed ytInitialData: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Clone)]
pub struct YouTubeClient {
    client: Client,
    base_url: String,
}

impl YouTubeClient {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Searches for `"{song} - {artist}"`. Errors are logged and yield `None`.
    pub async fn find_video(&self, song_name: &str, artist: &str) -> Option<VideoResult> {
        let query = format!("{} - {}", song_name, artist);
        match self.search(query.trim()).await {
            Ok(result) => result,
            Err(e) => {
                warning!("Error searching YouTube for {:?}: {}", query.trim(), e);
                None
            }
        }
    }

    /// Top video result for a free-text query.
    pub async fn search(&self, query: &str) -> Result<Option<VideoResult>, YouTubeError> {
        let response = self
            .client
            .get(format!("{}/results", self.base_url))
            .query(&[("search_query", query), ("sp", VIDEO_FILTER)])
            .header(reqwest::header::USER_AGENT, BROWSER_USER_AGENT)
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(YouTubeError::Status(status));
        }

        let html = response.text().await?;
        let data = initial_data(&html)?;
        Ok(first_video(&data))
    }
}

/// Parses the `ytInitialData` object out of a results page.
pub fn initial_data(html: &str) -> Result<Value, YouTubeError> {
    let start = INITIAL_DATA_MARKERS
        .iter()
        .find_map(|marker| html.find(marker).map(|pos| pos + marker.len()))
        .ok_or(YouTubeError::MissingInitialData)?;

    // the object is followed by `;</script>`, so read exactly one JSON value
    let mut values = serde_json::Deserializer::from_str(&html[start..]).into_iter::<Value>();
    match values.next() {
        Some(value) => Ok(value?),
        None => Err(YouTubeError::MissingInitialData),
    }
}

/// Depth-first search for the first `videoRenderer` with a `videoId`.
pub fn first_video(data: &Value) -> Option<VideoResult> {
    match data {
        Value::Object(map) => {
            if let Some(renderer) = map.get("videoRenderer") {
                if let Some(id) = renderer.get("videoId").and_then(Value::as_str) {
                    return Some(VideoResult {
                        id: id.to_string(),
                        title: video_title(renderer),
                    });
                }
            }
            map.values().find_map(first_video)
        }
        Value::Array(items) => items.iter().find_map(first_video),
        _ => None,
    }
}

fn video_title(renderer: &Value) -> Option<String> {
    let title = renderer.get("title")?;
    if let Some(text) = title.pointer("/runs/0/text").and_then(Value::as_str) {
        return Some(text.to_string());
    }
    title
        .get("simpleText")
        .and_then(Value::as_str)
        .map(str::to_string)
}
