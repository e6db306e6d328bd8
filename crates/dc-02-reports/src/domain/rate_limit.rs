//! Per-reporter rate limiting using a keyed token bucket.

use governor::{
    clock::{Clock, DefaultClock},
    state::keyed::DefaultKeyedStateStore,
    Quota, RateLimiter,
};
use serde::{Deserialize, Serialize};
use shared_types::UserId;
use std::num::NonZeroU32;
use std::time::Duration;
use tracing::debug;

/// Report throttling configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportLimits {
    pub enabled: bool,
    /// Sustained reports per reporter per minute.
    pub reports_per_minute: u32,
    /// Reports a reporter may submit back-to-back.
    pub burst: u32,
}

impl Default for ReportLimits {
    fn default() -> Self {
        Self {
            enabled: true,
            reports_per_minute: 10,
            burst: 5,
        }
    }
}

impl ReportLimits {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

type KeyedLimiter = RateLimiter<UserId, DefaultKeyedStateStore<UserId>, DefaultClock>;

/// Token bucket per reporter.
pub struct ReportRateLimiter {
    limiter: Option<KeyedLimiter>,
    clock: DefaultClock,
}

impl ReportRateLimiter {
    pub fn new(limits: &ReportLimits) -> Self {
        let limiter = limits.enabled.then(|| {
            let rate = NonZeroU32::new(limits.reports_per_minute).unwrap_or(NonZeroU32::MIN);
            let burst = NonZeroU32::new(limits.burst).unwrap_or(NonZeroU32::MIN);
            RateLimiter::keyed(Quota::per_minute(rate).allow_burst(burst))
        });
        Self {
            limiter,
            clock: DefaultClock::default(),
        }
    }

    /// Takes one token for `reporter`, or returns how long until one is free.
    pub fn check(&self, reporter: &UserId) -> Result<(), Duration> {
        let Some(limiter) = &self.limiter else {
            return Ok(());
        };
        match limiter.check_key(reporter) {
            Ok(()) => Ok(()),
            Err(not_until) => {
                let wait = not_until.wait_time_from(self.clock.now());
                debug!(reporter = %reporter, wait_ms = wait.as_millis() as u64, "report rate limited");
                Err(wait)
            }
        }
    }

    /// Drops buckets that are back to full capacity.
    pub fn cleanup(&self) {
        if let Some(limiter) = &self.limiter {
            limiter.retain_recent();
        }
    }

    pub fn tracked_reporters(&self) -> usize {
        self.limiter.as_ref().map_or(0, |l| l.len())
    }
}
