//! Wire shapes for the marketplace search and token endpoints.
//!
//! Items stay as raw [`serde_json::Value`]s; their shape drifts between app
//! releases and is handled by [`crate::extract`].

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Origin {
    pub latitude: f64,
    pub longitude: f64,
}

/// Body of the item search request.
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest<'a> {
    pub user_id: &'a str,
    pub origin: Origin,
    pub radius: u32,
    pub page_size: u32,
    pub page: u32,
    pub discover: bool,
    pub favorites_only: bool,
    pub item_categories: Vec<String>,
    pub diet_categories: Vec<String>,
    pub pickup_earliest: Option<String>,
    pub pickup_latest: Option<String>,
    pub search_phrase: Option<String>,
    pub with_stock_only: bool,
    pub hidden_only: bool,
    pub we_care_only: bool,
}

impl<'a> SearchRequest<'a> {
    /// First page of a non-favorites search around `origin`.
    #[must_use]
    pub fn around(user_id: &'a str, origin: Origin, radius: u32, page_size: u32) -> Self {
        Self {
            user_id,
            origin,
            radius,
            page_size,
            page: 1,
            discover: false,
            favorites_only: false,
            item_categories: Vec::new(),
            diet_categories: Vec::new(),
            pickup_earliest: None,
            pickup_latest: None,
            search_phrase: None,
            with_stock_only: false,
            hidden_only: false,
            we_care_only: false,
        }
    }
}

/// `items` may be absent or `null` when nothing is listed nearby.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub items: Vec<serde_json::Value>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<serde_json::Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Serialize)]
pub struct TokenRefreshRequest<'a> {
    pub refresh_token: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct TokenRefreshResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
}
