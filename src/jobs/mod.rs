//! # Jobs
//!
//! Write-side operations on the archive:
//!
//! - [`PlaylistSync`] imports new playlist tracks with sequential week labels
//! - [`ensure_latest_has_youtube_id`] backfills the latest song's video id
//! - [`trigger_sync`] wraps a sync run in the rate limiter; the HTTP
//!   endpoint, the `sync` command and the background scheduler all go
//!   through it

mod backfill;
mod sync;

pub use backfill::{BackfillOutcome, ensure_latest_has_youtube_id};
pub use sync::{PlaylistSync, SyncError, SyncFailure, SyncReport};

use crate::{management::RateLimiter, types::SyncResponse};

/// How a rate-limited sync attempt ended.
#[derive(Debug)]
pub enum SyncOutcome {
    RateLimited {
        max_executions: u32,
        window_hours: i64,
    },
    NotConfigured {
        message: String,
        remaining: u32,
    },
    Failed {
        failure: SyncFailure,
        remaining: u32,
    },
    Completed {
        report: SyncReport,
        remaining: u32,
    },
}

impl SyncOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SyncOutcome::Completed { .. })
    }

    pub fn to_response(&self) -> SyncResponse {
        match self {
            SyncOutcome::RateLimited {
                max_executions,
                window_hours,
            } => SyncResponse {
                success: false,
                message: format!(
                    "Rate limit exceeded. Maximum {} executions per {} hours.",
                    max_executions, window_hours
                ),
                output: Vec::new(),
                remaining: 0,
                error: None,
            },
            SyncOutcome::NotConfigured { message, remaining } => SyncResponse {
                success: false,
                message: message.clone(),
                output: Vec::new(),
                remaining: *remaining,
                error: None,
            },
            SyncOutcome::Failed { failure, remaining } => SyncResponse {
                success: false,
                message: "Failed to fetch songs".to_string(),
                output: failure.log.clone(),
                remaining: *remaining,
                error: Some(failure.error.to_string()),
            },
            SyncOutcome::Completed { report, remaining } => SyncResponse {
                success: true,
                message: "Songs fetched successfully".to_string(),
                output: report.log.clone(),
                remaining: *remaining,
                error: None,
            },
        }
    }
}

/// Admits one sync run through the rate limiter and executes it.
///
/// `sync` carries the configuration error when Spotify credentials are
/// missing; the attempt is then refused without recording an execution.
pub async fn trigger_sync(
    limiter: &RateLimiter,
    sync: Result<&PlaylistSync, String>,
    playlist_id: &str,
) -> SyncOutcome {
    let decision = limiter.check().await;
    if !decision.allowed {
        return SyncOutcome::RateLimited {
            max_executions: limiter.max_executions(),
            window_hours: limiter.window_hours(),
        };
    }

    let sync = match sync {
        Ok(sync) => sync,
        Err(message) => {
            return SyncOutcome::NotConfigured {
                message,
                remaining: decision.remaining,
            };
        }
    };

    limiter.record().await;
    let remaining = decision.remaining.saturating_sub(1);

    match sync.run(playlist_id).await {
        Ok(report) => SyncOutcome::Completed { report, remaining },
        Err(failure) => SyncOutcome::Failed { failure, remaining },
    }
}
