use std::{net::SocketAddr, str::FromStr, sync::Arc, time::Duration};

use axum::{
    Extension, Router,
    routing::{get, post},
};
use reqwest::Client;
use tokio::task::JoinHandle;

use crate::{
    Res, api,
    config::{ConfigError, Settings, SupabaseSettings},
    info,
    jobs::{self, PlaylistSync, SyncOutcome},
    lastfm::LastFmClient,
    management::RateLimiter,
    spotify::{PlaylistSource, SpotifyClient},
    store::{ExecutionLog, MemoryStore, SongStore, SupabaseStore},
    success, utils, warning,
    youtube::YouTubeClient,
};

/// Everything a request or job needs. Built once, shared read-only.
pub struct AppState {
    pub store: Arc<dyn SongStore>,
    pub rate_limiter: RateLimiter,
    pub playlist_sync: Result<PlaylistSync, ConfigError>,
    pub lastfm: Option<LastFmClient>,
    pub youtube: YouTubeClient,
    pub playlist_id: String,
}

impl AppState {
    /// Wires the configured backends. Without Supabase credentials the
    /// archive lives in memory for the lifetime of the process.
    pub fn from_settings(settings: &Settings) -> Result<Self, reqwest::Error> {
        let client = utils::http_client(settings.http_timeout)?;

        match &settings.supabase {
            Some(supabase) => Ok(Self::supabase(settings, client, supabase)),
            None => {
                warning!("Supabase credentials not found, using an in-memory store");
                let store = Arc::new(MemoryStore::new());
                Ok(Self::with_stores(settings, client, store.clone(), store))
            }
        }
    }

    /// Like [`AppState::from_settings`] but refuses to run without Supabase.
    ///
    /// One-shot commands exit right after their work, so an in-memory archive
    /// and execution log would silently discard everything.
    pub fn persistent(settings: &Settings) -> Res<Self> {
        let supabase = settings.supabase_settings()?;
        let client = utils::http_client(settings.http_timeout)?;
        Ok(Self::supabase(settings, client, supabase))
    }

    fn supabase(settings: &Settings, client: Client, supabase: &SupabaseSettings) -> Self {
        let store = Arc::new(SupabaseStore::new(client.clone(), supabase));
        Self::with_stores(settings, client, store.clone(), store)
    }

    pub fn with_stores(
        settings: &Settings,
        client: Client,
        store: Arc<dyn SongStore>,
        executions: Arc<dyn ExecutionLog>,
    ) -> Self {
        let playlist_sync = settings.spotify_credentials().map(|credentials| {
            let source: Arc<dyn PlaylistSource> = Arc::new(SpotifyClient::new(
                client.clone(),
                &settings.spotify_accounts_url,
                &settings.spotify_api_url,
                credentials.clone(),
            ));
            PlaylistSync::new(store.clone(), source)
        });

        let lastfm = settings
            .lastfm_api_key
            .clone()
            .map(|key| LastFmClient::new(client.clone(), key, &settings.lastfm_api_url));

        Self {
            store,
            rate_limiter: RateLimiter::new(executions, settings.rate_limit),
            playlist_sync,
            lastfm,
            youtube: YouTubeClient::new(client, &settings.youtube_url),
            playlist_id: settings.playlist_id.clone(),
        }
    }

    pub fn sync(&self) -> Result<&PlaylistSync, String> {
        self.playlist_sync.as_ref().map_err(|e| e.to_string())
    }

    pub async fn trigger_sync(&self) -> SyncOutcome {
        jobs::trigger_sync(&self.rate_limiter, self.sync(), &self.playlist_id).await
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/api/musix/fetch-songs", get(api::fetch_songs))
        .route("/api/musix/ensure-youtube-id", get(api::ensure_youtube_id))
        .route("/api/musix/latest-song", get(api::latest_song))
        .route("/api/musix/album-art", get(api::album_art))
        .route("/api/musix/search-youtube", post(api::search_youtube))
        .route("/api/musix/songs", get(api::songs))
        .layer(Extension(state))
}

/// Runs a rate-limited sync followed by the YouTube id backfill every
/// `every`, starting immediately.
pub fn spawn_scheduler(state: Arc<AppState>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            info!("Scheduled playlist sync starting");

            let outcome = state.trigger_sync().await;
            let response = outcome.to_response();
            if !outcome.is_success() {
                warning!(
                    "Scheduled sync did not complete: {} {}",
                    response.message,
                    response.error.unwrap_or_default()
                );
                continue;
            }
            success!("{} ({} runs left in window)", response.message, response.remaining);

            let backfill =
                jobs::ensure_latest_has_youtube_id(state.store.as_ref(), &state.youtube).await;
            info!("YouTube backfill: {}", backfill.message());
        }
    })
}

/// Binds `settings.server_addr` and serves until the process stops.
pub async fn serve(settings: Settings, sync_every: Option<Duration>) -> Res<()> {
    let addr = SocketAddr::from_str(&settings.server_addr)?;
    let state = Arc::new(AppState::from_settings(&settings)?);

    if let Some(every) = sync_every {
        info!("Syncing playlist every {} minute(s)", every.as_secs() / 60);
        spawn_scheduler(Arc::clone(&state), every);
    }

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);
    axum::serve(listener, router(state)).await?;
    Ok(())
}
