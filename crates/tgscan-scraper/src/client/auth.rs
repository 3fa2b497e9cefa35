//! Access-token refresh for `TgtgClient`.

use crate::error::ScraperError;
use crate::types::{TokenRefreshRequest, TokenRefreshResponse};

use super::{check_status, TgtgClient};

const TOKEN_REFRESH_PATH: &str = "auth/v3/token/refresh";

impl TgtgClient {
    /// Exchanges the refresh token for a fresh access token and swaps it in.
    ///
    /// The refresh token is rotated too when the response carries one.
    ///
    /// # Errors
    ///
    /// Same status mapping as [`TgtgClient::search_items`];
    /// [`ScraperError::Deserialize`] if the response lacks `access_token`.
    pub async fn refresh_access_token(&mut self) -> Result<(), ScraperError> {
        let url = self.endpoint(TOKEN_REFRESH_PATH)?;

        let response = self
            .client
            .post(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US")
            .header(reqwest::header::COOKIE, &self.cookie)
            .json(&TokenRefreshRequest {
                refresh_token: &self.refresh_token,
            })
            .send()
            .await?;

        let body = check_status(response, &url).await?.text().await?;
        let tokens = serde_json::from_str::<TokenRefreshResponse>(&body).map_err(|e| {
            ScraperError::Deserialize {
                context: "token refresh".to_owned(),
                source: e,
            }
        })?;

        self.access_token = tokens.access_token;
        if let Some(refresh_token) = tokens.refresh_token.filter(|t| !t.is_empty()) {
            self.refresh_token = refresh_token;
        }

        tracing::info!("access token refreshed");
        Ok(())
    }
}
