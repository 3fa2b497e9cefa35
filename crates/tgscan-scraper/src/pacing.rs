//! Failure classification and inter-zone pacing.
//!
//! The scan never retries a zone. After every zone it waits a short,
//! optionally randomized delay; after a 403 it additionally waits a longer
//! cooldown before moving on.

use std::time::Duration;

use rand::Rng;

use crate::error::ScraperError;

/// How a zone request failure should be treated by the scan loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// HTTP 403 from the abuse filter; back off longer.
    RateLimited,
    /// Anything else: network, auth, bad body, unexpected status.
    Other,
}

impl FailureKind {
    #[must_use]
    pub fn classify(err: &ScraperError) -> Self {
        match err {
            ScraperError::RateLimited { .. } => FailureKind::RateLimited,
            _ => FailureKind::Other,
        }
    }
}

/// Delays applied between zones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacingPolicy {
    pub zone_delay_min: Duration,
    pub zone_delay_max: Duration,
    pub rate_limit_cooldown: Duration,
}

impl PacingPolicy {
    #[must_use]
    pub fn from_millis(zone_delay_min_ms: u64, zone_delay_max_ms: u64, cooldown_secs: u64) -> Self {
        Self {
            zone_delay_min: Duration::from_millis(zone_delay_min_ms),
            zone_delay_max: Duration::from_millis(zone_delay_max_ms.max(zone_delay_min_ms)),
            rate_limit_cooldown: Duration::from_secs(cooldown_secs),
        }
    }

    /// No waiting at all.
    #[must_use]
    pub fn immediate() -> Self {
        Self {
            zone_delay_min: Duration::ZERO,
            zone_delay_max: Duration::ZERO,
            rate_limit_cooldown: Duration::ZERO,
        }
    }

    /// The regular between-zone delay: uniform in `[min, max]`, or exactly
    /// `min` when the bounds are equal.
    #[must_use]
    pub fn zone_delay(&self) -> Duration {
        if self.zone_delay_max <= self.zone_delay_min {
            return self.zone_delay_min;
        }
        rand::rng().random_range(self.zone_delay_min..=self.zone_delay_max)
    }

    /// Total wait after a zone, given how its request ended.
    ///
    /// `None` means the request succeeded.
    #[must_use]
    pub fn cooldown_after(&self, failure: Option<FailureKind>) -> Duration {
        let base = self.zone_delay();
        match failure {
            Some(FailureKind::RateLimited) => base.saturating_add(self.rate_limit_cooldown),
            Some(FailureKind::Other) | None => base,
        }
    }

    /// Wait after the last zone of a pass: no regular delay, but a 403
    /// still earns the extended cooldown before the next pass can start.
    #[must_use]
    pub fn cooldown_after_last(&self, failure: Option<FailureKind>) -> Duration {
        match failure {
            Some(FailureKind::RateLimited) => self.rate_limit_cooldown,
            Some(FailureKind::Other) | None => Duration::ZERO,
        }
    }
}
