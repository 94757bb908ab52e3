//! Bounded retry policy for provider calls.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::warn;

use crate::error::FetchError;

/// How many times to attempt a call and how long to wait in between.
///
/// Only [`FetchError::Transient`] failures are retried. A multiplier of
/// `1.0` gives a fixed delay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
    pub backoff_multiplier: f64,
}

impl RetryPolicy {
    /// Fixed delay between attempts.
    #[must_use]
    pub const fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
            backoff_multiplier: 1.0,
        }
    }

    /// Single attempt, no waiting.
    #[must_use]
    pub const fn none() -> Self {
        Self::fixed(1, Duration::ZERO)
    }

    /// Delay after the given failed attempt (1-based).
    #[must_use]
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16) as i32;
        self.delay
            .mul_f64(self.backoff_multiplier.max(1.0).powi(exponent))
    }

    /// Run `op` until it succeeds, fails permanently, or attempts run out.
    ///
    /// # Errors
    ///
    /// Returns the last error seen.
    pub async fn run<T, F, Fut>(&self, operation: &str, mut op: F) -> Result<T, FetchError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, FetchError>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 0;
        loop {
            attempt += 1;
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() && attempt < max_attempts => {
                    let delay = self.delay_after(attempt);
                    warn!(
                        operation,
                        attempt,
                        max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Request failed, retrying"
                    );
                    if !delay.is_zero() {
                        sleep(delay).await;
                    }
                }
                Err(err) => return Err(err),
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::fixed(3, Duration::from_secs(1))
    }
}
