pub mod app_config;
pub mod config;
pub mod grid;
pub mod output;
pub mod records;
pub mod zones;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use grid::{generate_grid, GridConfig, GridPoint};
pub use output::{read_scan_result, write_scan_result, OutputError};
pub use records::{ScanResult, StoreRecord};
pub use zones::{load_zones, nyc_boroughs, nyc_grid, Zone, ZoneSet};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read zones file {path}: {source}")]
    ZonesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse zones file: {0}")]
    ZonesFileParse(#[source] serde_yaml::Error),

    #[error("zone validation failed: {0}")]
    Validation(String),
}
