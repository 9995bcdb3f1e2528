use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{Client, RequestBuilder, Response, StatusCode};

use crate::{
    config::SupabaseSettings,
    store::{ExecutionLog, RATE_LIMIT_TABLE, SONGS_TABLE, SongStore, StoreError},
    types::{ExecutionRow, NewSong, Song, SongRow, YoutubeIdPatch},
    utils,
};

const SONG_COLUMNS: &str = "week,song_name,artist,youtube_id,spotify_track_id";

/// PostgREST client for a Supabase project.
pub struct SupabaseStore {
    client: Client,
    rest_url: String,
    key: String,
}

impl SupabaseStore {
    pub fn new(client: Client, settings: &SupabaseSettings) -> Self {
        Self {
            client,
            rest_url: format!("{}/rest/v1", settings.url.trim_end_matches('/')),
            key: settings.key.clone(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.rest_url, table)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request.header("apikey", &self.key).bearer_auth(&self.key)
    }

    async fn check(response: Response) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        if status == StatusCode::CONFLICT {
            return Err(StoreError::Conflict(body));
        }
        Err(StoreError::Status { status, body })
    }
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[async_trait]
impl SongStore for SupabaseStore {
    async fn list_songs(&self) -> Result<Vec<Song>, StoreError> {
        let request = self
            .client
            .get(self.table_url(SONGS_TABLE))
            .query(&[("select", SONG_COLUMNS)]);
        let response = Self::check(self.authorize(request).send().await?).await?;

        let body = response.text().await?;
        let rows: Vec<SongRow> = serde_json::from_str(&body)?;

        let mut songs: Vec<Song> = rows.into_iter().map(Song::from).collect();
        utils::sort_songs_latest_first(&mut songs);
        Ok(songs)
    }

    async fn insert_song(&self, song: &NewSong) -> Result<(), StoreError> {
        let row = SongRow {
            week: song.week.clone(),
            song_name: song.song_name.clone(),
            artist: song.artist.clone(),
            youtube_id: song.youtube_id.clone(),
            spotify_track_id: song.spotify_track_id.clone(),
        };

        let request = self
            .client
            .post(self.table_url(SONGS_TABLE))
            .header("Prefer", "return=minimal")
            .json(&row);
        Self::check(self.authorize(request).send().await?).await?;
        Ok(())
    }

    async fn update_youtube_id(
        &self,
        spotify_track_id: &str,
        youtube_id: &str,
    ) -> Result<(), StoreError> {
        let request = self
            .client
            .patch(self.table_url(SONGS_TABLE))
            .query(&[("spotify_track_id", format!("eq.{}", spotify_track_id))])
            .header("Prefer", "return=minimal")
            .json(&YoutubeIdPatch { youtube_id });
        Self::check(self.authorize(request).send().await?).await?;
        Ok(())
    }
}

#[async_trait]
impl ExecutionLog for SupabaseStore {
    async fn purge_executions_before(&self, cutoff: DateTime<Utc>) -> Result<(), StoreError> {
        let request = self
            .client
            .delete(self.table_url(RATE_LIMIT_TABLE))
            .query(&[("executed_at", format!("lt.{}", timestamp(cutoff)))]);
        Self::check(self.authorize(request).send().await?).await?;
        Ok(())
    }

    async fn executions_since(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<DateTime<Utc>>, StoreError> {
        let request = self.client.get(self.table_url(RATE_LIMIT_TABLE)).query(&[
            ("select", "executed_at".to_string()),
            ("executed_at", format!("gte.{}", timestamp(cutoff))),
            ("order", "executed_at.desc".to_string()),
        ]);
        let response = Self::check(self.authorize(request).send().await?).await?;

        let body = response.text().await?;
        let rows: Vec<ExecutionRow> = serde_json::from_str(&body)?;
        Ok(rows.into_iter().map(|r| r.executed_at).collect())
    }

    async fn record_execution(&self, at: DateTime<Utc>) -> Result<(), StoreError> {
        let request = self
            .client
            .post(self.table_url(RATE_LIMIT_TABLE))
            .header("Prefer", "return=minimal")
            .json(&ExecutionRow { executed_at: at });
        Self::check(self.authorize(request).send().await?).await?;
        Ok(())
    }
}
