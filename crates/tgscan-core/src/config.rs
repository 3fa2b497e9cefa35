use crate::app_config::{AppConfig, DEFAULT_API_BASE_URL, DEFAULT_USER_AGENT};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let access_token = require("TGTG_ACCESS_TOKEN")?;
    let refresh_token = require("TGTG_REFRESH_TOKEN")?;
    let user_id = require("TGTG_USER_ID")?;
    let cookie = or_default("TGTG_COOKIE", "datadome=123");

    let log_level = or_default("TGSCAN_LOG_LEVEL", "info");
    let api_base_url = or_default("TGSCAN_API_BASE_URL", DEFAULT_API_BASE_URL);
    let output_path = PathBuf::from(or_default("TGSCAN_OUTPUT_PATH", "nyc_data.json"));
    let zones_path = lookup("TGSCAN_ZONES_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    let search_radius_km = parse_u32("TGSCAN_SEARCH_RADIUS_KM", "10")?;
    let page_size = parse_u32("TGSCAN_PAGE_SIZE", "300")?;
    if page_size == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "TGSCAN_PAGE_SIZE".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    let request_timeout_secs = parse_u64("TGSCAN_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("TGSCAN_USER_AGENT", DEFAULT_USER_AGENT);

    let zone_delay_min_ms = parse_u64("TGSCAN_ZONE_DELAY_MIN_MS", "2000")?;
    let zone_delay_max_ms = parse_u64("TGSCAN_ZONE_DELAY_MAX_MS", "5000")?;
    if zone_delay_min_ms > zone_delay_max_ms {
        return Err(ConfigError::InvalidEnvVar {
            var: "TGSCAN_ZONE_DELAY_MAX_MS".to_string(),
            reason: format!(
                "{zone_delay_max_ms} is below TGSCAN_ZONE_DELAY_MIN_MS ({zone_delay_min_ms})"
            ),
        });
    }
    let rate_limit_cooldown_secs = parse_u64("TGSCAN_RATE_LIMIT_COOLDOWN_SECS", "60")?;

    let save_each_zone = parse_bool(
        "TGSCAN_SAVE_EACH_ZONE",
        &or_default("TGSCAN_SAVE_EACH_ZONE", "false"),
    )?;

    Ok(AppConfig {
        access_token,
        refresh_token,
        user_id,
        cookie,
        log_level,
        api_base_url,
        output_path,
        zones_path,
        search_radius_km,
        page_size,
        request_timeout_secs,
        user_agent,
        zone_delay_min_ms,
        zone_delay_max_ms,
        rate_limit_cooldown_secs,
        save_each_zone,
    })
}

fn parse_bool(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" | "" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected true/false, got \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
