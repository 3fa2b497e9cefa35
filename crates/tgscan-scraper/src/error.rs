use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// HTTP 403: the upstream abuse filter wants us to back off.
    #[error("rate limited by {url} (HTTP 403)")]
    RateLimited { url: String },

    #[error("unauthorized by {url}: access token rejected or expired")]
    Unauthorized { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("normalization error for item {item_id}: {reason}")]
    Normalization { item_id: String, reason: String },

    #[error("invalid API base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
