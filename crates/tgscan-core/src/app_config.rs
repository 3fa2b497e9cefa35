use std::path::PathBuf;

/// Mobile-app style user agent; the search endpoint rejects generic clients.
pub const DEFAULT_USER_AGENT: &str =
    "TGTG/24.11.0 Dalvik/2.1.0 (Linux; U; Android 14; Pixel 8 Build/UQ1A.240105.004)";

pub const DEFAULT_API_BASE_URL: &str = "https://apptoogoodtogo.com/api/";

#[derive(Clone)]
pub struct AppConfig {
    pub access_token: String,
    pub refresh_token: String,
    pub user_id: String,
    pub cookie: String,
    pub log_level: String,
    pub api_base_url: String,
    pub output_path: PathBuf,
    pub zones_path: Option<PathBuf>,
    pub search_radius_km: u32,
    pub page_size: u32,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub zone_delay_min_ms: u64,
    pub zone_delay_max_ms: u64,
    pub rate_limit_cooldown_secs: u64,
    pub save_each_zone: bool,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("access_token", &"[redacted]")
            .field("refresh_token", &"[redacted]")
            .field("user_id", &"[redacted]")
            .field("cookie", &"[redacted]")
            .field("log_level", &self.log_level)
            .field("api_base_url", &self.api_base_url)
            .field("output_path", &self.output_path)
            .field("zones_path", &self.zones_path)
            .field("search_radius_km", &self.search_radius_km)
            .field("page_size", &self.page_size)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("zone_delay_min_ms", &self.zone_delay_min_ms)
            .field("zone_delay_max_ms", &self.zone_delay_max_ms)
            .field("rate_limit_cooldown_secs", &self.rate_limit_cooldown_secs)
            .field("save_each_zone", &self.save_each_zone)
            .finish()
    }
}
