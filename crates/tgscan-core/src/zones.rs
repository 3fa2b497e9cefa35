use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::grid::{generate_grid, GridConfig};
use crate::ConfigError;

/// A named search center. The search radius is a scan setting, not a zone
/// property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Zone {
    #[must_use]
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }
}

/// Built-in zone sets selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZoneSet {
    /// One center per borough.
    #[default]
    Boroughs,
    /// Uniform grid over the five boroughs.
    Grid,
}

impl ZoneSet {
    #[must_use]
    pub fn zones(self) -> Vec<Zone> {
        match self {
            ZoneSet::Boroughs => nyc_boroughs(),
            ZoneSet::Grid => nyc_grid(),
        }
    }
}

impl std::fmt::Display for ZoneSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ZoneSet::Boroughs => write!(f, "boroughs"),
            ZoneSet::Grid => write!(f, "grid"),
        }
    }
}

impl std::str::FromStr for ZoneSet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "boroughs" => Ok(ZoneSet::Boroughs),
            "grid" => Ok(ZoneSet::Grid),
            other => Err(format!(
                "unknown zone set \"{other}\"; expected boroughs or grid"
            )),
        }
    }
}

/// Approximate borough centers, scanned in this order.
#[must_use]
pub fn nyc_boroughs() -> Vec<Zone> {
    vec![
        Zone::new("Manhattan", 40.7831, -73.9712),
        Zone::new("Brooklyn", 40.6782, -73.9442),
        Zone::new("Queens", 40.7282, -73.7949),
        Zone::new("The Bronx", 40.8448, -73.8648),
        Zone::new("Staten Island", 40.5795, -74.1502),
    ]
}

/// Dense grid over the five boroughs, named `grid-01`, `grid-02`, ...
#[must_use]
pub fn nyc_grid() -> Vec<Zone> {
    generate_grid(&GridConfig::nyc())
        .into_iter()
        .enumerate()
        .map(|(idx, p)| Zone::new(format!("grid-{:02}", idx + 1), p.lat, p.lng))
        .collect()
}

#[derive(Debug, Deserialize)]
pub struct ZonesFile {
    pub zones: Vec<Zone>,
}

/// Load and validate a zone list from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_zones(path: &Path) -> Result<Vec<Zone>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ZonesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let zones_file: ZonesFile =
        serde_yaml::from_str(&content).map_err(ConfigError::ZonesFileParse)?;

    validate_zones(&zones_file.zones)?;

    Ok(zones_file.zones)
}

fn validate_zones(zones: &[Zone]) -> Result<(), ConfigError> {
    if zones.is_empty() {
        return Err(ConfigError::Validation(
            "zones file must list at least one zone".to_string(),
        ));
    }

    let mut seen_names = HashSet::new();

    for zone in zones {
        if zone.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "zone name must be non-empty".to_string(),
            ));
        }

        if !(-90.0..=90.0).contains(&zone.latitude) {
            return Err(ConfigError::Validation(format!(
                "zone '{}' has latitude {} outside [-90, 90]",
                zone.name, zone.latitude
            )));
        }

        if !(-180.0..=180.0).contains(&zone.longitude) {
            return Err(ConfigError::Validation(format!(
                "zone '{}' has longitude {} outside [-180, 180]",
                zone.name, zone.longitude
            )));
        }

        if !seen_names.insert(zone.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate zone name: '{}'",
                zone.name
            )));
        }
    }

    Ok(())
}
