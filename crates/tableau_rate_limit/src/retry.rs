//! Bounded retries of a single backend call.

use crate::RetryConfig;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tokio_retry2::strategy::FixedInterval;
use tokio_retry2::{Retry, RetryError};
use tracing::warn;

/// Fixed-interval retry policy.
///
/// `max_attempts` counts the first call, so `1` disables retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl RetryPolicy {
    /// Create a policy making at most `max_attempts` calls, `delay` apart.
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// Build a policy from the `[retry]` configuration section.
    pub fn from_config(config: &RetryConfig) -> Self {
        Self::new(config.max_attempts, Duration::from_millis(config.delay_ms))
    }

    /// A policy that calls exactly once.
    pub fn once() -> Self {
        Self::new(1, Duration::ZERO)
    }

    /// Total attempts, including the first.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Run `operation`, retrying every error until attempts are exhausted.
    ///
    /// Returns the last error when no attempt succeeds.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let result = policy
    ///     .execute("submit Mara", || async { backend.submit_prompt(&prompt, None).await })
    ///     .await?;
    /// ```
    pub async fn execute<F, Fut, R, E>(&self, label: &str, mut operation: F) -> Result<R, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<R, E>>,
        E: Display,
    {
        let strategy = FixedInterval::new(self.delay).take(self.max_attempts as usize - 1);
        let max_attempts = self.max_attempts;
        let mut attempt = 0u32;

        Retry::spawn(strategy, || {
            attempt += 1;
            let current = attempt;
            let call = operation();
            async move {
                call.await.map_err(|e| {
                    if current < max_attempts {
                        warn!(label, attempt = current, max_attempts, error = %e, "Attempt failed, will retry");
                    }
                    RetryError::Transient {
                        err: e,
                        retry_after: None,
                    }
                })
            }
        })
        .await
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&RetryConfig::default())
    }
}
