//! Output record shapes written to the scan file.

use chrono::{DateTime, Local, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Timestamp format for [`ScanResult::updated_at`].
pub const UPDATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One listing, flattened from the marketplace's nested item document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreRecord {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub available: u32,
    pub rating: f64,
    pub ratings_count: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub original_price: Decimal,
    pub currency: String,
    pub category: String,
    pub pickup_start: Option<DateTime<Utc>>,
    pub pickup_end: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
    pub cover_image: Option<String>,
}

/// The whole-run artifact. `total_stores` always equals `stores.len()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    updated_at: String,
    total_stores: usize,
    stores: Vec<StoreRecord>,
}

impl ScanResult {
    #[must_use]
    pub fn new(updated_at: impl Into<String>, stores: Vec<StoreRecord>) -> Self {
        Self {
            updated_at: updated_at.into(),
            total_stores: stores.len(),
            stores,
        }
    }

    /// Builds a result stamped with the current local time.
    #[must_use]
    pub fn stamped_now(stores: Vec<StoreRecord>) -> Self {
        Self::new(Local::now().format(UPDATED_AT_FORMAT).to_string(), stores)
    }

    #[must_use]
    pub fn updated_at(&self) -> &str {
        &self.updated_at
    }

    #[must_use]
    pub fn total_stores(&self) -> usize {
        self.total_stores
    }

    #[must_use]
    pub fn stores(&self) -> &[StoreRecord] {
        &self.stores
    }
}
