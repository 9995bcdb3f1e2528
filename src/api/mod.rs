//! # API Module
//!
//! HTTP endpoints consumed by the website's song-of-the-week widget.
//!
//! ## Endpoints
//!
//! ### Sync
//!
//! - [`fetch_songs`] - rate-limited playlist import, returns the sync log
//! - [`ensure_youtube_id`] - backfills the latest song's YouTube id
//!
//! ### Read
//!
//! - [`latest_song`] - latest weekly pick
//! - [`album_art`] - latest pick with Last.fm album art
//! - [`songs`] - the whole archive
//! - [`search_youtube`] - ad-hoc video lookup for a song and artist
//!
//! ### Monitoring
//!
//! - [`health`] - status, version and which integrations are configured
//!
//! Read endpoints always answer 200 with nullable fields, so a provider or
//! store outage never breaks page rendering. Shared state is an
//! `Arc<AppState>` handed to handlers through an axum `Extension`.

mod health;
mod songs;
mod sync;

pub use health::health;
pub use songs::{album_art, latest_song, search_youtube, songs};
pub use sync::{ensure_youtube_id, fetch_songs};
