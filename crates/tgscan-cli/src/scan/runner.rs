//! The sequential zone loop.

use std::time::Duration;

use tgscan_core::Zone;
use tgscan_scraper::{normalize_item, FailureKind, ItemSource};

use super::{Aggregator, ScanSettings};

/// What happened to one zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ZoneOutcome {
    Scanned {
        returned: usize,
        added: usize,
        duplicates: usize,
        dropped: usize,
    },
    RateLimited {
        error: String,
    },
    Failed {
        error: String,
    },
}

impl std::fmt::Display for ZoneOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ZoneOutcome::Scanned {
                returned,
                added,
                duplicates,
                dropped,
            } => write!(
                f,
                "{returned} items, {added} new, {duplicates} duplicates, {dropped} dropped"
            ),
            ZoneOutcome::RateLimited { error } => write!(f, "rate limited ({error})"),
            ZoneOutcome::Failed { error } => write!(f, "failed ({error})"),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ZoneReport {
    pub zone: String,
    pub outcome: ZoneOutcome,
    /// Wait applied after this zone. After the last zone only a 403
    /// cooldown applies.
    pub cooldown: Duration,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct ScanReport {
    pub zones: Vec<ZoneReport>,
}

impl ScanReport {
    pub(crate) fn rate_limited_count(&self) -> usize {
        self.zones
            .iter()
            .filter(|z| matches!(z.outcome, ZoneOutcome::RateLimited { .. }))
            .count()
    }

    pub(crate) fn total_cooldown(&self) -> Duration {
        self.zones.iter().map(|z| z.cooldown).sum()
    }

    pub(crate) fn failed_count(&self) -> usize {
        self.zones
            .iter()
            .filter(|z| matches!(z.outcome, ZoneOutcome::Failed { .. }))
            .count()
    }
}

/// Scans every zone in order, merging normalized items into `aggregator`.
///
/// Request failures are classified and logged, never returned: a 403 earns
/// the extended cooldown, anything else the regular delay. `on_zone` runs
/// after each zone is merged and before the cooldown sleep.
pub(crate) async fn scan_zones<S, F>(
    source: &S,
    settings: &ScanSettings,
    aggregator: &mut Aggregator,
    mut on_zone: F,
) -> ScanReport
where
    S: ItemSource + Sync,
    F: FnMut(&Zone, &Aggregator),
{
    let total = settings.zones.len();
    let mut report = ScanReport::default();

    for (idx, zone) in settings.zones.iter().enumerate() {
        tracing::info!(zone = %zone.name, position = idx + 1, total, "scanning zone");

        let (outcome, failure) = match source
            .search_items(zone, settings.radius_km, settings.page_size)
            .await
        {
            Ok(items) => (merge_items(zone, &items, aggregator), None),
            Err(e) => {
                let kind = FailureKind::classify(&e);
                let error = e.to_string();
                match kind {
                    FailureKind::RateLimited => {
                        tracing::warn!(zone = %zone.name, %error, "rate limited; cooling down");
                        (ZoneOutcome::RateLimited { error }, Some(kind))
                    }
                    FailureKind::Other => {
                        tracing::error!(zone = %zone.name, %error, "zone scan failed");
                        (ZoneOutcome::Failed { error }, Some(kind))
                    }
                }
            }
        };

        on_zone(zone, aggregator);

        let cooldown = if idx + 1 < total {
            settings.pacing.cooldown_after(failure)
        } else {
            settings.pacing.cooldown_after_last(failure)
        };
        if !cooldown.is_zero() {
            tracing::debug!(zone = %zone.name, ?cooldown, "sleeping");
            tokio::time::sleep(cooldown).await;
        }

        report.zones.push(ZoneReport {
            zone: zone.name.clone(),
            outcome,
            cooldown,
        });
    }

    report
}

fn merge_items(
    zone: &Zone,
    items: &[serde_json::Value],
    aggregator: &mut Aggregator,
) -> ZoneOutcome {
    let mut added = 0usize;
    let mut duplicates = 0usize;
    let mut dropped = 0usize;

    for raw in items {
        match normalize_item(raw) {
            Ok(record) => {
                if aggregator.insert(record) {
                    added += 1;
                } else {
                    duplicates += 1;
                }
            }
            Err(e) => {
                tracing::debug!(zone = %zone.name, error = %e, "skipping item");
                dropped += 1;
            }
        }
    }

    tracing::info!(
        zone = %zone.name,
        returned = items.len(),
        added,
        duplicates,
        dropped,
        unique_total = aggregator.len(),
        "zone merged"
    );

    ZoneOutcome::Scanned {
        returned: items.len(),
        added,
        duplicates,
        dropped,
    }
}
