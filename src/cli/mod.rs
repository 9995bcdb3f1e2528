//! # CLI Module
//!
//! Command implementations behind the `musix` binary. Each command builds the
//! application state from [`crate::config::Settings`] and reports through the
//! crate's console macros.
//!
//! - [`serve`] - HTTP server, optionally with a background sync schedule
//! - [`sync`] - one rate-limited playlist sync plus YouTube backfill (cron)
//! - [`backfill`] - YouTube id backfill for the latest song
//! - [`list_songs`] - archive table
//!
//! ```bash
//! musix serve --sync-every 60
//! musix sync
//! musix songs --search radiohead
//! ```

mod serve;
mod songs;
mod sync;

pub use serve::serve;
pub use songs::list_songs;
pub use sync::backfill;
pub use sync::sync;
