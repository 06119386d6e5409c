//! Bounded retry with exponential backoff.
//!
//! Retry *n* (1-based) waits up to `base_delay * 2^(n-1)`. With full jitter
//! the actual wait is drawn uniformly from `[0, ceiling]`, so concurrent
//! callers that failed together do not retry together.

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tokio_util::sync::CancellationToken;

use icalstash_core::config::RetryConfig;

use crate::error::{ClientResult, Operation, StoreError, StoreResult};

/// How the backoff ceiling turns into an actual delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Jitter {
    /// Wait exactly the ceiling.
    None,
    /// Wait a uniformly random duration between zero and the ceiling.
    Full,
}

/// Retry settings shared by every store operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt; total attempts are `max_retries + 1`.
    pub max_retries: u32,
    pub base_delay: Duration,
    pub jitter: Jitter,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            jitter: Jitter::Full,
        }
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            base_delay: Duration::from_millis(config.base_delay_ms),
            jitter: Jitter::Full,
        }
    }
}

impl RetryPolicy {
    /// Upper bound of the wait before retry `retry` (1-based).
    #[must_use]
    pub fn backoff_ceiling(&self, retry: u32) -> Duration {
        let factor = 2_u32.saturating_pow(retry.saturating_sub(1));
        self.base_delay.saturating_mul(factor)
    }

    /// Actual wait before retry `retry` (1-based), jitter applied.
    #[must_use]
    pub fn delay_for(&self, retry: u32) -> Duration {
        let ceiling = self.backoff_ceiling(retry);
        match self.jitter {
            Jitter::None => ceiling,
            Jitter::Full => {
                let ceiling_ms = u64::try_from(ceiling.as_millis()).unwrap_or(u64::MAX);
                Duration::from_millis(rand::thread_rng().gen_range(0..=ceiling_ms))
            }
        }
    }

    /// ## Summary
    /// Runs `attempt` until it succeeds, fails permanently, or the retries
    /// are used up.
    ///
    /// Cancellation is checked while an attempt is in flight and while
    /// waiting between attempts.
    ///
    /// ## Errors
    /// - `StoreError::Permanent` on the first non-transient failure
    /// - `StoreError::Transient` with the last error once retries run out
    /// - `StoreError::Cancelled` when `cancel` fires
    pub async fn run<T, F, Fut>(
        &self,
        op: Operation,
        key: &str,
        cancel: &CancellationToken,
        mut attempt: F,
    ) -> StoreResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ClientResult<T>>,
    {
        let cancelled = || StoreError::Cancelled {
            op,
            key: key.to_string(),
        };

        let mut attempts: u32 = 0;
        loop {
            attempts += 1;

            let outcome = tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(cancelled()),
                outcome = attempt() => outcome,
            };

            let error = match outcome {
                Ok(value) => {
                    if attempts > 1 {
                        tracing::debug!(%op, key, attempts, "Storage call succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(error) => error,
            };

            if !error.is_transient() {
                return Err(StoreError::Permanent {
                    op,
                    key: key.to_string(),
                    source: error,
                });
            }

            if attempts > self.max_retries {
                tracing::error!(%op, key, attempts, %error, "Storage retries exhausted");
                return Err(StoreError::Transient {
                    op,
                    key: key.to_string(),
                    attempts,
                    source: error,
                });
            }

            let delay = self.delay_for(attempts);
            tracing::warn!(
                %op,
                key,
                attempt = attempts,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                %error,
                "Transient storage failure, retrying"
            );

            tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(cancelled()),
                () = tokio::time::sleep(delay) => {}
            }
        }
    }
}
