use std::sync::Arc;

use axum::{Extension, http::StatusCode, response::Json};

use crate::{
    jobs::{self, SyncOutcome},
    server::AppState,
    types::{BackfillResponse, SyncResponse},
    warning,
};

/// `GET /api/musix/fetch-songs`
///
/// 429 when the rate limiter refuses the run, 500 for missing credentials or
/// an aborted run, 200 otherwise. The sync log is returned line by line.
pub async fn fetch_songs(
    Extension(state): Extension<Arc<AppState>>,
) -> (StatusCode, Json<SyncResponse>) {
    let outcome = state.trigger_sync().await;

    let status = match &outcome {
        SyncOutcome::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
        SyncOutcome::NotConfigured { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        SyncOutcome::Failed { failure, .. } => {
            warning!("Playlist sync failed: {}", failure.error);
            StatusCode::INTERNAL_SERVER_ERROR
        }
        SyncOutcome::Completed { .. } => StatusCode::OK,
    };

    (status, Json(outcome.to_response()))
}

/// `GET /api/musix/ensure-youtube-id`
pub async fn ensure_youtube_id(
    Extension(state): Extension<Arc<AppState>>,
) -> Json<BackfillResponse> {
    let outcome = jobs::ensure_latest_has_youtube_id(state.store.as_ref(), &state.youtube).await;
    Json(outcome.into())
}
