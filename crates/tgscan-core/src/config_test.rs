use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with all required env vars populated.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("TGTG_ACCESS_TOKEN", "access-abc");
    m.insert("TGTG_REFRESH_TOKEN", "refresh-def");
    m.insert("TGTG_USER_ID", "4242");
    m
}

#[test]
fn build_app_config_fails_without_access_token() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "TGTG_ACCESS_TOKEN"),
        "expected MissingEnvVar(TGTG_ACCESS_TOKEN), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_without_user_id() {
    let mut map = full_env();
    map.remove("TGTG_USER_ID");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "TGTG_USER_ID"),
        "expected MissingEnvVar(TGTG_USER_ID), got: {result:?}"
    );
}

#[test]
fn build_app_config_treats_blank_token_as_missing() {
    let mut map = full_env();
    map.insert("TGTG_REFRESH_TOKEN", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "TGTG_REFRESH_TOKEN"),
        "expected MissingEnvVar(TGTG_REFRESH_TOKEN), got: {result:?}"
    );
}

#[test]
fn build_app_config_succeeds_with_required_vars() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.access_token, "access-abc");
    assert_eq!(cfg.refresh_token, "refresh-def");
    assert_eq!(cfg.user_id, "4242");
    assert_eq!(cfg.cookie, "datadome=123");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.api_base_url, "https://apptoogoodtogo.com/api/");
    assert_eq!(cfg.output_path.to_str(), Some("nyc_data.json"));
    assert!(cfg.zones_path.is_none());
    assert_eq!(cfg.search_radius_km, 10);
    assert_eq!(cfg.page_size, 300);
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.zone_delay_min_ms, 2000);
    assert_eq!(cfg.zone_delay_max_ms, 5000);
    assert_eq!(cfg.rate_limit_cooldown_secs, 60);
    assert!(!cfg.save_each_zone);
}

#[test]
fn build_app_config_reads_cookie_override() {
    let mut map = full_env();
    map.insert("TGTG_COOKIE", "datadome=live-cookie");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.cookie, "datadome=live-cookie");
}

#[test]
fn build_app_config_reads_zones_path() {
    let mut map = full_env();
    map.insert("TGSCAN_ZONES_PATH", "./config/zones.yaml");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(
        cfg.zones_path.as_deref().and_then(|p| p.to_str()),
        Some("./config/zones.yaml")
    );
}

#[test]
fn build_app_config_rejects_invalid_radius() {
    let mut map = full_env();
    map.insert("TGSCAN_SEARCH_RADIUS_KM", "ten");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TGSCAN_SEARCH_RADIUS_KM"),
        "expected InvalidEnvVar(TGSCAN_SEARCH_RADIUS_KM), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_page_size() {
    let mut map = full_env();
    map.insert("TGSCAN_PAGE_SIZE", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TGSCAN_PAGE_SIZE"),
        "expected InvalidEnvVar(TGSCAN_PAGE_SIZE), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_inverted_delay_range() {
    let mut map = full_env();
    map.insert("TGSCAN_ZONE_DELAY_MIN_MS", "9000");
    map.insert("TGSCAN_ZONE_DELAY_MAX_MS", "1000");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TGSCAN_ZONE_DELAY_MAX_MS"),
        "expected InvalidEnvVar(TGSCAN_ZONE_DELAY_MAX_MS), got: {result:?}"
    );
}

#[test]
fn build_app_config_accepts_fixed_delay() {
    let mut map = full_env();
    map.insert("TGSCAN_ZONE_DELAY_MIN_MS", "2000");
    map.insert("TGSCAN_ZONE_DELAY_MAX_MS", "2000");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.zone_delay_min_ms, cfg.zone_delay_max_ms);
}

#[test]
fn build_app_config_rejects_invalid_cooldown() {
    let mut map = full_env();
    map.insert("TGSCAN_RATE_LIMIT_COOLDOWN_SECS", "-5");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TGSCAN_RATE_LIMIT_COOLDOWN_SECS"),
        "expected InvalidEnvVar(TGSCAN_RATE_LIMIT_COOLDOWN_SECS), got: {result:?}"
    );
}

#[test]
fn parse_bool_accepts_common_spellings() {
    assert!(parse_bool("X", "true").unwrap());
    assert!(parse_bool("X", "YES").unwrap());
    assert!(parse_bool("X", "1").unwrap());
    assert!(!parse_bool("X", "false").unwrap());
    assert!(!parse_bool("X", "0").unwrap());
}

#[test]
fn build_app_config_rejects_invalid_save_each_zone() {
    let mut map = full_env();
    map.insert("TGSCAN_SAVE_EACH_ZONE", "sometimes");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TGSCAN_SAVE_EACH_ZONE"),
        "expected InvalidEnvVar(TGSCAN_SAVE_EACH_ZONE), got: {result:?}"
    );
}

#[test]
fn debug_output_redacts_credentials() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("access-abc"));
    assert!(!rendered.contains("refresh-def"));
    assert!(!rendered.contains("4242"));
    assert!(rendered.contains("[redacted]"));
}
