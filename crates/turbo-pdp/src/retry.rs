//! Retry policy for the product load.

use std::future::Future;
use std::time::Duration;

use crate::api::ApiError;

/// Backoff strategy between retry attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackoffStrategy {
    /// No delay between retries.
    None,
    /// Fixed delay between retries.
    Fixed(Duration),
}

impl BackoffStrategy {
    /// Calculate delay for a given attempt number (0-indexed).
    pub fn delay_for_attempt(&self, _attempt: u32) -> Duration {
        match self {
            Self::None => Duration::ZERO,
            Self::Fixed(d) => *d,
        }
    }
}

/// Retry policy configuration.
///
/// Every failure is retried. `max_attempts` counts retries, not calls: a
/// policy with `max_attempts = 3` makes at most four calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts.
    pub max_attempts: u32,
    /// Backoff strategy.
    pub backoff: BackoffStrategy,
}

impl RetryPolicy {
    /// Retry up to `max_attempts` times, waiting `delay` between calls.
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        let backoff = if delay.is_zero() {
            BackoffStrategy::None
        } else {
            BackoffStrategy::Fixed(delay)
        };
        Self {
            max_attempts,
            backoff,
        }
    }

    /// Check if should retry after the given attempt (0-indexed) failed.
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }

    /// Run `op` until it succeeds or the policy gives up.
    ///
    /// `op` receives the 0-indexed attempt number. The last error is returned
    /// when retries are exhausted.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T, ApiError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let mut attempt = 0;
        loop {
            match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(error) if self.should_retry(attempt) => {
                    let delay = self.backoff.delay_for_attempt(attempt);
                    tracing::debug!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %error,
                        "retrying storefront call"
                    );
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    attempt += 1;
                }
                Err(error) => return Err(error),
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::fixed(3, Duration::from_secs(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_backoff_delays() {
        assert_eq!(BackoffStrategy::None.delay_for_attempt(3), Duration::ZERO);
        assert_eq!(
            BackoffStrategy::Fixed(Duration::from_secs(1)).delay_for_attempt(7),
            Duration::from_secs(1)
        );
    }

    #[test]
    fn test_zero_delay_means_no_backoff() {
        assert_eq!(
            RetryPolicy::fixed(3, Duration::ZERO).backoff,
            BackoffStrategy::None
        );
        assert_eq!(
            RetryPolicy::default().backoff,
            BackoffStrategy::Fixed(Duration::from_secs(1))
        );
    }

    #[test]
    fn test_should_retry_counts_retries() {
        let policy = RetryPolicy::fixed(1, Duration::ZERO);
        assert!(policy.should_retry(0));
        assert!(!policy.should_retry(1));

        assert!(!RetryPolicy::fixed(0, Duration::ZERO).should_retry(0));
    }

    #[tokio::test]
    async fn test_run_gives_up_after_max_attempts() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let policy = RetryPolicy::fixed(3, Duration::ZERO);

        let result: Result<(), _> = policy
            .run(move |_| async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(ApiError::MissingData("Product data not found".into()))
            })
            .await;

        assert!(matches!(result, Err(ApiError::MissingData(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_run_returns_first_success() {
        let policy = RetryPolicy::fixed(3, Duration::ZERO);

        let result = policy
            .run(|attempt| async move {
                if attempt < 2 {
                    Err(ApiError::Connection("refused".into()))
                } else {
                    Ok(attempt)
                }
            })
            .await;

        assert_eq!(result.unwrap(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_waits_between_attempts() {
        let policy = RetryPolicy::fixed(2, Duration::from_secs(1));
        let started = tokio::time::Instant::now();

        let _: Result<(), _> = policy
            .run(|_| async { Err(ApiError::Timeout("slow".into())) })
            .await;

        assert!(started.elapsed() >= Duration::from_secs(2));
    }
}
