use crate::{
    spotify::{SpotifyClient, SpotifyError},
    types::{PlaylistTrack, PlaylistTracksPage},
    utils,
};

pub const PAGE_SIZE: u32 = 50;

impl SpotifyClient {
    /// Retrieves every track of a playlist in playlist order.
    ///
    /// Starts at `/playlists/{id}/tracks?limit=50` and follows the `next` URL
    /// until Spotify returns none. Entries whose `track` is null (removed or
    /// unavailable items) are dropped. Multiple artists are joined with `", "`.
    ///
    /// Pages are requested one after another; any non-2xx page aborts with
    /// [`SpotifyError::Status`] and discards what was collected.
    pub async fn playlist_tracks(
        &self,
        token: &str,
        playlist_id: &str,
    ) -> Result<Vec<PlaylistTrack>, SpotifyError> {
        let mut tracks: Vec<PlaylistTrack> = Vec::new();
        let mut next_url: Option<String> = Some(format!(
            "{uri}/playlists/{id}/tracks?limit={limit}",
            uri = self.api_url,
            id = playlist_id,
            limit = PAGE_SIZE
        ));

        while let Some(url) = next_url {
            let res = self.client.get(&url).bearer_auth(token).send().await?;

            let status = res.status();
            let body = res.text().await?;
            if !status.is_success() {
                return Err(SpotifyError::Status {
                    context: "API",
                    status,
                    body,
                });
            }

            let page: PlaylistTracksPage = serde_json::from_str(&body)?;
            tracks.extend(
                page.items
                    .into_iter()
                    .filter_map(|item| item.track)
                    .map(|track| PlaylistTrack {
                        id: track.id.filter(|id| !id.is_empty()),
                        artist: utils::join_artists(&track.artists),
                        name: track.name,
                    }),
            );

            next_url = page.next;
        }

        Ok(tracks)
    }
}
