//! The `scan` command: resolve settings, walk the zones, persist the result.
//!
//! Zone and item failures are logged and skipped; only setup problems and
//! the final save can fail the command.

mod aggregate;
mod runner;

use std::path::PathBuf;

use clap::Args;
use tgscan_core::{AppConfig, ScanResult, Zone, ZoneSet};
use tgscan_scraper::{ClientConfig, ItemSource, PacingPolicy, TgtgClient};

pub(crate) use aggregate::Aggregator;
pub(crate) use runner::{scan_zones, ScanReport};

/// Options shared by `scan` and `schedule`. Unset options fall back to the
/// environment configuration.
#[derive(Debug, Clone, Default, Args)]
pub struct ScanArgs {
    /// Where to write the JSON snapshot (overrides TGSCAN_OUTPUT_PATH)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Built-in zone set to scan: boroughs or grid
    #[arg(long)]
    pub zone_set: Option<ZoneSet>,

    /// YAML file listing zones (overrides TGSCAN_ZONES_PATH and --zone-set)
    #[arg(long)]
    pub zones_file: Option<PathBuf>,

    /// Search radius around each zone center, in km
    #[arg(long)]
    pub radius: Option<u32>,

    /// Items requested per zone
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Rewrite the snapshot after every zone instead of once at the end
    #[arg(long)]
    pub save_each_zone: bool,

    /// Exchange the refresh token for a new access token before scanning
    #[arg(long)]
    pub refresh_token: bool,

    /// Print the scan plan without calling the API or writing files
    #[arg(long)]
    pub dry_run: bool,
}

/// Everything one scan pass needs, resolved up front.
#[derive(Debug, Clone)]
pub(crate) struct ScanSettings {
    pub zones: Vec<Zone>,
    pub radius_km: u32,
    pub page_size: u32,
    pub pacing: PacingPolicy,
    pub output_path: PathBuf,
    pub save_each_zone: bool,
}

impl ScanSettings {
    /// Merges CLI overrides over the environment configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a zones file is configured but cannot be loaded,
    /// or if an override is zero where zero makes no sense.
    pub(crate) fn resolve(config: &AppConfig, args: &ScanArgs) -> anyhow::Result<Self> {
        let zones_path = args.zones_file.as_ref().or(config.zones_path.as_ref());
        let zones = match zones_path {
            Some(path) => tgscan_core::load_zones(path)?,
            None => args.zone_set.unwrap_or_default().zones(),
        };

        let page_size = args.page_size.unwrap_or(config.page_size);
        if page_size == 0 {
            anyhow::bail!("--page-size must be greater than zero");
        }

        Ok(Self {
            zones,
            radius_km: args.radius.unwrap_or(config.search_radius_km),
            page_size,
            pacing: PacingPolicy::from_millis(
                config.zone_delay_min_ms,
                config.zone_delay_max_ms,
                config.rate_limit_cooldown_secs,
            ),
            output_path: args
                .output
                .clone()
                .unwrap_or_else(|| config.output_path.clone()),
            save_each_zone: args.save_each_zone || config.save_each_zone,
        })
    }
}

/// Handler for `tgscan scan`.
///
/// # Errors
///
/// Returns an error if settings cannot be resolved, the client cannot be
/// built, or the final snapshot cannot be written.
pub(crate) async fn run_scan(config: &AppConfig, args: &ScanArgs) -> anyhow::Result<()> {
    let settings = ScanSettings::resolve(config, args)?;

    if args.dry_run {
        print_plan(&settings);
        return Ok(());
    }

    let mut client = TgtgClient::new(&ClientConfig::from_app_config(config))
        .map_err(|e| anyhow::anyhow!("failed to build marketplace client: {e}"))?;

    if args.refresh_token {
        if let Err(e) = client.refresh_access_token().await {
            tracing::warn!(error = %e, "token refresh failed; continuing with configured access token");
        }
    }

    let (result, report) = execute(&client, &settings).await?;

    for zone in &report.zones {
        println!("  {:<16} {}", zone.zone, zone.outcome);
    }
    println!(
        "scan complete: {} unique stores from {} zones saved to {} ({} rate-limited, {} failed, {:?} spent cooling down)",
        result.total_stores(),
        report.zones.len(),
        settings.output_path.display(),
        report.rate_limited_count(),
        report.failed_count(),
        report.total_cooldown(),
    );

    Ok(())
}

/// Runs one pass over `settings.zones` and writes the final snapshot.
///
/// With `save_each_zone` the snapshot is also rewritten after every zone; a
/// failed intermediate save is logged and the scan keeps going.
pub(crate) async fn execute<S>(
    source: &S,
    settings: &ScanSettings,
) -> anyhow::Result<(ScanResult, ScanReport)>
where
    S: ItemSource + Sync,
{
    tracing::info!(
        zones = settings.zones.len(),
        radius_km = settings.radius_km,
        page_size = settings.page_size,
        "starting scan"
    );

    let mut aggregator = Aggregator::new();
    let report = scan_zones(source, settings, &mut aggregator, |zone, aggregate| {
        if !settings.save_each_zone {
            return;
        }
        if let Err(e) = tgscan_core::write_scan_result(&settings.output_path, &aggregate.snapshot())
        {
            tracing::error!(zone = %zone.name, error = %e, "incremental save failed");
        }
    })
    .await;

    let result = aggregator.into_result();
    tgscan_core::write_scan_result(&settings.output_path, &result)?;

    tracing::info!(
        stores = result.total_stores(),
        path = %settings.output_path.display(),
        "scan saved"
    );

    Ok((result, report))
}

fn print_plan(settings: &ScanSettings) {
    println!(
        "dry-run: would scan {} zones (radius {} km, page size {}) and write {}",
        settings.zones.len(),
        settings.radius_km,
        settings.page_size,
        settings.output_path.display()
    );
    for zone in &settings.zones {
        println!(
            "  {:<16} {:>9.4} {:>9.4}",
            zone.name, zone.latitude, zone.longitude
        );
    }
    println!(
        "pacing: {:?}..={:?} between zones, +{:?} after a 403; save after each zone: {}",
        settings.pacing.zone_delay_min,
        settings.pacing.zone_delay_max,
        settings.pacing.rate_limit_cooldown,
        settings.save_each_zone
    );
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod runner_tests;
