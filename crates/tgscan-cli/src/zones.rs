//! The `zones` command: list scan centers without touching the network.

use std::path::{Path, PathBuf};

use clap::Args;
use tgscan_core::{Zone, ZoneSet};

#[derive(Debug, Clone, Default, Args)]
pub struct ZoneArgs {
    /// Built-in zone set to list: boroughs or grid
    #[arg(long)]
    pub zone_set: Option<ZoneSet>,

    /// YAML file listing zones (overrides TGSCAN_ZONES_PATH and --zone-set)
    #[arg(long)]
    pub zones_file: Option<PathBuf>,
}

/// Handler for `tgscan zones`.
///
/// # Errors
///
/// Returns an error if the zones file cannot be loaded.
pub(crate) fn run_zones(args: &ZoneArgs) -> anyhow::Result<()> {
    // Only the zones path is read; listing needs no credentials.
    let env_zones_path = std::env::var("TGSCAN_ZONES_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);
    let zones = selected_zones(args, env_zones_path.as_deref())?;
    println!("{} zones", zones.len());
    for zone in &zones {
        println!(
            "  {:<16} {:>9.4} {:>9.4}",
            zone.name, zone.latitude, zone.longitude
        );
    }
    Ok(())
}

/// Same precedence as `scan`: `--zones-file`, then `TGSCAN_ZONES_PATH`,
/// then `--zone-set`.
fn selected_zones(args: &ZoneArgs, env_zones_path: Option<&Path>) -> anyhow::Result<Vec<Zone>> {
    match args.zones_file.as_deref().or(env_zones_path) {
        Some(path) => Ok(tgscan_core::load_zones(path)?),
        None => Ok(args.zone_set.unwrap_or_default().zones()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_boroughs() {
        let zones = selected_zones(&ZoneArgs::default(), None).unwrap();
        let names: Vec<&str> = zones.iter().map(|z| z.name.as_str()).collect();
        assert_eq!(
            names,
            ["Manhattan", "Brooklyn", "Queens", "The Bronx", "Staten Island"]
        );
    }

    #[test]
    fn grid_set_is_named_sequentially() {
        let args = ZoneArgs {
            zone_set: Some(ZoneSet::Grid),
            zones_file: None,
        };
        let zones = selected_zones(&args, None).unwrap();
        assert_eq!(zones[0].name, "grid-01");
    }

    fn zone_file(dir: &tempfile::TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(
            &path,
            format!("zones:\n  - name: {name}\n    latitude: 40.7644\n    longitude: -73.9235\n"),
        )
        .unwrap();
        path
    }

    #[test]
    fn env_zones_path_overrides_zone_set() {
        let dir = tempfile::tempdir().unwrap();
        let env_path = zone_file(&dir, "env-zones");
        let args = ZoneArgs {
            zone_set: Some(ZoneSet::Grid),
            zones_file: None,
        };
        let zones = selected_zones(&args, Some(env_path.as_path())).unwrap();
        assert_eq!(zones, [Zone::new("env-zones", 40.7644, -73.9235)]);
    }

    #[test]
    fn zones_file_flag_overrides_env_zones_path() {
        let dir = tempfile::tempdir().unwrap();
        let env_path = zone_file(&dir, "env-zones");
        let flag_path = zone_file(&dir, "flag-zones");
        let args = ZoneArgs {
            zone_set: None,
            zones_file: Some(flag_path),
        };
        let zones = selected_zones(&args, Some(env_path.as_path())).unwrap();
        assert_eq!(zones[0].name, "flag-zones");
    }

    #[test]
    fn missing_zones_file_is_an_error() {
        let args = ZoneArgs {
            zone_set: None,
            zones_file: Some(PathBuf::from("/nonexistent/zones.yaml")),
        };
        assert!(run_zones(&args).is_err());
    }
}
