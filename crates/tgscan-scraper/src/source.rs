//! The seam between the scan loop and the network.

use std::future::Future;

use tgscan_core::Zone;

use crate::error::ScraperError;

/// Anything that can answer "which items are listed around this zone".
///
/// [`crate::TgtgClient`] is the production implementation; tests script
/// responses per zone.
pub trait ItemSource {
    fn search_items(
        &self,
        zone: &Zone,
        radius_km: u32,
        page_size: u32,
    ) -> impl Future<Output = Result<Vec<serde_json::Value>, ScraperError>> + Send;
}
