//! HTTP client for the marketplace's item search endpoint.

mod auth;

use std::time::Duration;

use reqwest::{Client, Url};
use tgscan_core::{AppConfig, Zone};

use crate::error::ScraperError;
use crate::source::ItemSource;
use crate::types::{Origin, SearchRequest, SearchResponse};

const ITEM_SEARCH_PATH: &str = "item/v8/";

/// Connection and credential settings for [`TgtgClient`].
#[derive(Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub access_token: String,
    pub refresh_token: String,
    pub user_id: String,
    pub cookie: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl ClientConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
            access_token: config.access_token.clone(),
            refresh_token: config.refresh_token.clone(),
            user_id: config.user_id.clone(),
            cookie: config.cookie.clone(),
            user_agent: config.user_agent.clone(),
            timeout_secs: config.request_timeout_secs,
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("access_token", &"[redacted]")
            .field("refresh_token", &"[redacted]")
            .field("user_id", &"[redacted]")
            .field("cookie", &"[redacted]")
            .field("user_agent", &self.user_agent)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Client for the marketplace search API, authenticated with bearer tokens
/// obtained out-of-band.
///
/// Non-2xx responses come back as typed errors: 403 as
/// [`ScraperError::RateLimited`], 401 as [`ScraperError::Unauthorized`].
/// The client never retries; pacing is the caller's job.
pub struct TgtgClient {
    client: Client,
    base_url: Url,
    access_token: String,
    refresh_token: String,
    user_id: String,
    cookie: String,
}

impl TgtgClient {
    /// Creates a client with configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ScraperError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(config: &ClientConfig) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            base_url: normalize_base_url(&config.base_url)?,
            access_token: config.access_token.clone(),
            refresh_token: config.refresh_token.clone(),
            user_id: config.user_id.clone(),
            cookie: config.cookie.clone(),
        })
    }

    /// Searches for items around `zone` and returns the raw item documents.
    ///
    /// Sends one `POST item/v8/` request for the first page only; `page_size`
    /// should be large enough to cover a zone.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::RateLimited`] — HTTP 403.
    /// - [`ScraperError::Unauthorized`] — HTTP 401.
    /// - [`ScraperError::UnexpectedStatus`] — any other non-2xx status.
    /// - [`ScraperError::Http`] — network or TLS failure.
    /// - [`ScraperError::Deserialize`] — response body is not valid JSON.
    pub async fn search_items(
        &self,
        zone: &Zone,
        radius_km: u32,
        page_size: u32,
    ) -> Result<Vec<serde_json::Value>, ScraperError> {
        let url = self.endpoint(ITEM_SEARCH_PATH)?;
        let body = SearchRequest::around(
            &self.user_id,
            Origin {
                latitude: zone.latitude,
                longitude: zone.longitude,
            },
            radius_km,
            page_size,
        );

        tracing::debug!(zone = %zone.name, %url, radius_km, page_size, "searching items");

        let response = self
            .client
            .post(url.clone())
            .bearer_auth(&self.access_token)
            .header(reqwest::header::ACCEPT, "application/json")
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US")
            .header(reqwest::header::COOKIE, &self.cookie)
            .json(&body)
            .send()
            .await?;

        let body = check_status(response, &url).await?.text().await?;
        let parsed = serde_json::from_str::<SearchResponse>(&body).map_err(|e| {
            ScraperError::Deserialize {
                context: format!("item search for zone {}", zone.name),
                source: e,
            }
        })?;

        Ok(parsed.items)
    }

    fn endpoint(&self, path: &str) -> Result<Url, ScraperError> {
        self.base_url
            .join(path)
            .map_err(|e| ScraperError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }
}

impl ItemSource for TgtgClient {
    async fn search_items(
        &self,
        zone: &Zone,
        radius_km: u32,
        page_size: u32,
    ) -> Result<Vec<serde_json::Value>, ScraperError> {
        TgtgClient::search_items(self, zone, radius_km, page_size).await
    }
}

/// Ensures the base URL ends with exactly one slash so that relative
/// endpoint paths join under it instead of replacing the last segment.
fn normalize_base_url(base_url: &str) -> Result<Url, ScraperError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| ScraperError::InvalidBaseUrl {
        base_url: base_url.to_owned(),
        reason: e.to_string(),
    })
}

/// Maps non-2xx statuses onto typed errors, passing successful responses through.
async fn check_status(
    response: reqwest::Response,
    url: &Url,
) -> Result<reqwest::Response, ScraperError> {
    let status = response.status();
    let url = url.to_string();

    if status == reqwest::StatusCode::FORBIDDEN {
        return Err(ScraperError::RateLimited { url });
    }

    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(ScraperError::Unauthorized { url });
    }

    if !status.is_success() {
        // Drain the body so the connection can be reused; content is not useful.
        let _ = response.bytes().await;
        return Err(ScraperError::UnexpectedStatus {
            status: status.as_u16(),
            url,
        });
    }

    Ok(response)
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
