use crate::{
    spotify::{SpotifyClient, SpotifyError},
    types::ClientCredentialsToken,
};

impl SpotifyClient {
    /// Obtains an app-only bearer token with the client-credentials grant.
    ///
    /// # Errors
    ///
    /// - [`SpotifyError::Status`] with context `auth` for any non-2xx answer,
    ///   typically invalid client credentials
    /// - [`SpotifyError::Http`] for network failures and timeouts
    /// - [`SpotifyError::Decode`] when the token payload is malformed
    pub async fn access_token(&self) -> Result<String, SpotifyError> {
        let res = self
            .client
            .post(format!("{}/api/token", self.accounts_url))
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.credentials.client_id.as_str()),
                ("client_secret", self.credentials.client_secret.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;
        if !status.is_success() {
            return Err(SpotifyError::Status {
                context: "auth",
                status,
                body,
            });
        }

        let token: ClientCredentialsToken = serde_json::from_str(&body)?;
        Ok(token.access_token)
    }
}
