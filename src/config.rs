//! Configuration management for the song-of-the-week service.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. Credentials are optional: a missing Spotify client
//! makes the sync refuse to run, a missing Last.fm key drops album art, and a
//! missing Supabase configuration falls back to an in-memory store. Nothing here
//! panics on an absent variable.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` in the working directory
//! 3. `.env` in the local data directory
//! 4. Application defaults (where applicable)

use std::{env, path::PathBuf, time::Duration};

use thiserror::Error;

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:3000";
pub const DEFAULT_PLAYLIST_ID: &str = "2vKyMZ7DVsdjn8YQ7iCgJP";
pub const DEFAULT_SPOTIFY_ACCOUNTS_URL: &str = "https://accounts.spotify.com";
pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_LASTFM_API_URL: &str = "https://ws.audioscrobbler.com/2.0/";
pub const DEFAULT_YOUTUBE_URL: &str = "https://www.youtube.com";
pub const DEFAULT_MAX_EXECUTIONS: u32 = 50;
pub const DEFAULT_WINDOW_HOURS: u32 = 24;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a number, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
    #[error("{0}")]
    Missing(&'static str),
}

/// Loads environment variables from `.env` files.
///
/// The working directory `.env` is read first, then `musix/.env` in the
/// platform-specific local data directory. Variables already present in the
/// environment are never overwritten. Missing files are not an error.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/musix/.env`
/// - macOS: `~/Library/Application Support/musix/.env`
/// - Windows: `%LOCALAPPDATA%/musix/.env`
///
/// # Errors
///
/// Returns an error string if the local data directory cannot be created.
pub async fn load_env() -> Result<(), String> {
    let _ = dotenv::dotenv();

    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("musix/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn first_var(names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| var(name))
}

fn number_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match var(name) {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
        None => Ok(default),
    }
}

/// Address the HTTP server binds to (`SERVER_ADDRESS`).
pub fn server_addr() -> String {
    var("SERVER_ADDRESS").unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string())
}

/// Spotify client id for the client-credentials flow (`SPOTIFY_CLIENT_ID`).
pub fn spotify_client_id() -> Option<String> {
    var("SPOTIFY_CLIENT_ID")
}

/// Spotify client secret (`SPOTIFY_CLIENT_SECRET`).
///
/// # Security Note
///
/// The client secret should be kept confidential and never exposed in logs
/// or version control.
pub fn spotify_client_secret() -> Option<String> {
    var("SPOTIFY_CLIENT_SECRET")
}

/// Playlist the weekly picks are imported from (`SPOTIFY_PLAYLIST_ID`).
pub fn spotify_playlist_id() -> String {
    var("SPOTIFY_PLAYLIST_ID").unwrap_or_else(|| DEFAULT_PLAYLIST_ID.to_string())
}

pub fn spotify_accounts_url() -> String {
    var("SPOTIFY_ACCOUNTS_URL").unwrap_or_else(|| DEFAULT_SPOTIFY_ACCOUNTS_URL.to_string())
}

pub fn spotify_apiurl() -> String {
    var("SPOTIFY_API_URL").unwrap_or_else(|| DEFAULT_SPOTIFY_API_URL.to_string())
}

/// Last.fm API key (`LASTFM_API_KEY`). Album art is skipped without it.
pub fn lastfm_api_key() -> Option<String> {
    var("LASTFM_API_KEY")
}

pub fn lastfm_apiurl() -> String {
    var("LASTFM_API_URL").unwrap_or_else(|| DEFAULT_LASTFM_API_URL.to_string())
}

pub fn youtube_url() -> String {
    var("YOUTUBE_URL").unwrap_or_else(|| DEFAULT_YOUTUBE_URL.to_string())
}

/// Supabase project URL (`SUPABASE_URL`, or the website's `NEXT_PUBLIC_SUPABASE_URL`).
pub fn supabase_url() -> Option<String> {
    first_var(&["SUPABASE_URL", "NEXT_PUBLIC_SUPABASE_URL"])
}

/// Supabase key, preferring the service role key over the anon key.
pub fn supabase_key() -> Option<String> {
    first_var(&[
        "SUPABASE_SERVICE_ROLE_KEY",
        "SUPABASE_KEY",
        "NEXT_PUBLIC_SUPABASE_ANON_KEY",
    ])
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpotifyCredentials {
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupabaseSettings {
    pub url: String,
    pub key: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitSettings {
    pub max_executions: u32,
    pub window_hours: u32,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            max_executions: DEFAULT_MAX_EXECUTIONS,
            window_hours: DEFAULT_WINDOW_HOURS,
        }
    }
}

/// Snapshot of every setting the service consumes.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server_addr: String,
    pub spotify: Option<SpotifyCredentials>,
    pub playlist_id: String,
    pub spotify_accounts_url: String,
    pub spotify_api_url: String,
    pub lastfm_api_key: Option<String>,
    pub lastfm_api_url: String,
    pub youtube_url: String,
    pub supabase: Option<SupabaseSettings>,
    pub rate_limit: RateLimitSettings,
    pub http_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_addr: DEFAULT_SERVER_ADDRESS.to_string(),
            spotify: None,
            playlist_id: DEFAULT_PLAYLIST_ID.to_string(),
            spotify_accounts_url: DEFAULT_SPOTIFY_ACCOUNTS_URL.to_string(),
            spotify_api_url: DEFAULT_SPOTIFY_API_URL.to_string(),
            lastfm_api_key: None,
            lastfm_api_url: DEFAULT_LASTFM_API_URL.to_string(),
            youtube_url: DEFAULT_YOUTUBE_URL.to_string(),
            supabase: None,
            rate_limit: RateLimitSettings::default(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl Settings {
    /// Reads the current environment. Only malformed numbers are errors.
    pub fn from_env() -> Result<Self, ConfigError> {
        let spotify = match (spotify_client_id(), spotify_client_secret()) {
            (Some(client_id), Some(client_secret)) => Some(SpotifyCredentials {
                client_id,
                client_secret,
            }),
            _ => None,
        };

        let supabase = match (supabase_url(), supabase_key()) {
            (Some(url), Some(key)) => Some(SupabaseSettings { url, key }),
            _ => None,
        };

        let max_executions = number_var("RATE_LIMIT_MAX_EXECUTIONS", DEFAULT_MAX_EXECUTIONS)?;
        let window_hours = number_var("RATE_LIMIT_WINDOW_HOURS", DEFAULT_WINDOW_HOURS)?;
        if window_hours == 0 {
            return Err(ConfigError::InvalidNumber {
                name: "RATE_LIMIT_WINDOW_HOURS",
                value: "0".to_string(),
            });
        }
        let timeout_secs = number_var("HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)?;

        Ok(Self {
            server_addr: server_addr(),
            spotify,
            playlist_id: spotify_playlist_id(),
            spotify_accounts_url: spotify_accounts_url(),
            spotify_api_url: spotify_apiurl(),
            lastfm_api_key: lastfm_api_key(),
            lastfm_api_url: lastfm_apiurl(),
            youtube_url: youtube_url(),
            supabase,
            rate_limit: RateLimitSettings {
                max_executions,
                window_hours,
            },
            http_timeout: Duration::from_secs(timeout_secs.max(1)),
        })
    }

    pub fn supabase_settings(&self) -> Result<&SupabaseSettings, ConfigError> {
        self.supabase.as_ref().ok_or(ConfigError::Missing(
            "SUPABASE_URL and SUPABASE_SERVICE_ROLE_KEY not found in environment variables",
        ))
    }

    pub fn spotify_credentials(&self) -> Result<&SpotifyCredentials, ConfigError> {
        self.spotify.as_ref().ok_or(ConfigError::Missing(
            "SPOTIFY_CLIENT_ID and SPOTIFY_CLIENT_SECRET not found in environment variables",
        ))
    }
}
