use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    config::Settings,
    error, info,
    jobs::{self, SyncOutcome},
    server::AppState,
    success, warning,
};

/// Runs one rate-limited sync, then the YouTube id backfill.
///
/// Exits non-zero when the sync is refused or aborted; the backfill is then
/// skipped.
pub async fn sync(settings: &Settings) {
    let state = match AppState::persistent(settings) {
        Ok(state) => state,
        Err(e) => error!("Cannot reach the song archive. Err: {}", e),
    };

    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Syncing playlist {}...", state.playlist_id));
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let outcome = state.trigger_sync().await;
    pb.finish_and_clear();

    let response = outcome.to_response();
    for line in &response.output {
        println!("{}", line);
    }

    match outcome {
        SyncOutcome::Completed { report, remaining } => {
            success!(
                "{} new song(s) added, {} run(s) left in window",
                report.added,
                remaining
            );
        }
        SyncOutcome::Failed { failure, .. } => error!("Sync failed: {}", failure.error),
        _ => error!("{}", response.message),
    }

    let backfill = jobs::ensure_latest_has_youtube_id(state.store.as_ref(), &state.youtube).await;
    if backfill.is_success() {
        info!("{}", backfill.message());
    } else {
        warning!("{}", backfill.message());
    }
}

/// Only the YouTube id backfill, without touching the playlist.
pub async fn backfill(settings: &Settings) {
    let state = match AppState::persistent(settings) {
        Ok(state) => state,
        Err(e) => error!("Cannot reach the song archive. Err: {}", e),
    };

    let outcome = jobs::ensure_latest_has_youtube_id(state.store.as_ref(), &state.youtube).await;
    match outcome.youtube_id() {
        Some(id) if outcome.is_success() => success!("{} ({})", outcome.message(), id),
        _ => warning!("{}", outcome.message()),
    }
}
