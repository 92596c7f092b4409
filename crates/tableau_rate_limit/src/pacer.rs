//! Courtesy pacing between backend submissions.

use crate::PacingConfig;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as GovernorRateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

// Type alias for our direct rate limiter
type DirectRateLimiter = GovernorRateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Applies the fixed post-item delay and the optional per-minute ceiling.
///
/// The delay is not adaptive: it is applied after every item whether the
/// item succeeded or not.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use tableau_rate_limit::Pacer;
///
/// let pacer = Pacer::new(Duration::from_secs(5), Some(6));
/// assert_eq!(pacer.delay(), Duration::from_secs(5));
/// ```
#[derive(Clone)]
pub struct Pacer {
    delay: Duration,
    rpm_limiter: Option<Arc<DirectRateLimiter>>,
}

impl std::fmt::Debug for Pacer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pacer")
            .field("delay", &self.delay)
            .field("rpm_limited", &self.rpm_limiter.is_some())
            .finish()
    }
}

impl Pacer {
    /// Create a pacer with a fixed delay and an optional requests-per-minute ceiling.
    pub fn new(delay: Duration, requests_per_minute: Option<u32>) -> Self {
        let rpm_limiter = requests_per_minute.and_then(|rpm| {
            NonZeroU32::new(rpm).map(|n| Arc::new(GovernorRateLimiter::direct(Quota::per_minute(n))))
        });

        Self { delay, rpm_limiter }
    }

    /// Build a pacer from the `[pacing]` configuration section.
    pub fn from_config(config: &PacingConfig) -> Self {
        Self::new(Duration::from_millis(config.delay_ms), config.requests_per_minute)
    }

    /// A pacer that never waits.
    pub fn immediate() -> Self {
        Self::new(Duration::ZERO, None)
    }

    /// The fixed post-item delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Wait until the per-minute ceiling admits another submission.
    pub async fn before_submission(&self) {
        if let Some(limiter) = &self.rpm_limiter {
            limiter.until_ready().await;
        }
    }

    /// Apply the fixed courtesy delay.
    pub async fn after_item(&self) {
        if self.delay.is_zero() {
            return;
        }
        debug!(delay_ms = self.delay.as_millis() as u64, "Pausing before next item");
        tokio::time::sleep(self.delay).await;
    }
}

impl Default for Pacer {
    fn default() -> Self {
        Self::from_config(&PacingConfig::default())
    }
}
