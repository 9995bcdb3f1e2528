//! Song-of-the-week service library
//!
//! This library imports tracks from a Spotify playlist into a small row store,
//! labels each new track with a sequential week, and serves the latest pick
//! together with album art and a playable YouTube video id.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints consumed by the website widget
//! - `cli` - Command-line command implementations
//! - `config` - Configuration management and environment variables
//! - `jobs` - Playlist sync, YouTube id backfill and the rate-limited trigger
//! - `lastfm` - Last.fm album art lookup
//! - `management` - Duplicate index and sync rate limiter
//! - `server` - HTTP server and router
//! - `spotify` - Spotify Web API client (client credentials)
//! - `store` - Row store gateway (Supabase and in-memory backends)
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//! - `youtube` - Keyless YouTube video search
//!
//! # Example
//!
//! ```
//! use musix::{config, server};
//!
//! #[tokio::main]
//! async fn main() -> musix::Res<()> {
//!     config::load_env().await?;
//!     let settings = config::Settings::from_env()?;
//!     server::serve(settings, None).await
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod jobs;
pub mod lastfm;
pub mod management;
pub mod server;
pub mod spotify;
pub mod store;
pub mod types;
pub mod utils;
pub mod youtube;

/// A convenient Result type alias for operations that may fail.
///
/// Used at the process edge (command handlers, server start-up) where errors
/// of different kinds meet. Component boundaries use their own typed errors.
///
/// # Example
///
/// ```
/// use musix::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Starting server on {}", addr);
/// info!("Found {} tracks in playlist", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Sync finished, {} song(s) added", added);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for unrecoverable start-up failures. Request handling and jobs
/// never call it; they log with [`warning!`] and degrade instead.
///
/// # Example
///
/// ```
/// error!("Failed to bind server address: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for every recovered failure: upstream provider errors, store hiccups,
/// missing optional credentials.
///
/// # Example
///
/// ```
/// warning!("Last.fm returned {} for track.getInfo", status);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
