// Bounded fixed-delay retry.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::config::Config;
use crate::error::{MutualsError, Result};

/// How many times an operation is attempted and how long to wait in between.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    pub delay: Duration,
    /// Decides whether a failure may be retried.
    pub retryable: fn(&MutualsError) -> bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            delay: Duration::from_secs(1),
            retryable: MutualsError::is_retryable,
        }
    }
}

impl RetryPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_attempts: config.retry_attempts.max(1),
            delay: config.retry_delay,
            ..Self::default()
        }
    }

    /// Default policy without the wait, for tests.
    pub fn immediate() -> Self {
        Self {
            delay: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Run `op` until it succeeds, fails with a final error, or attempts run out.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 1;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < self.max_attempts && (self.retryable)(&e) => {
                    warn!(attempt, error = %e, delay_ms = self.delay.as_millis() as u64, "Retrying after failure");
                    if !self.delay.is_zero() {
                        tokio::time::sleep(self.delay).await;
                    }
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_single_failure_then_success() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let result = RetryPolicy::immediate()
            .run(|| async move {
                if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(MutualsError::RemoteUnavailable { status: 500 })
                } else {
                    Ok(7)
                }
            })
            .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_two_failures_surface() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let result: Result<()> = RetryPolicy::immediate()
            .run(|| async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(MutualsError::RateLimited)
            })
            .await;

        assert!(matches!(result, Err(MutualsError::RateLimited)));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_user_not_found_is_final() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let result: Result<()> = RetryPolicy::immediate()
            .run(|| async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(MutualsError::UserNotFound("ghost".into()))
            })
            .await;

        assert!(matches!(result, Err(MutualsError::UserNotFound(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_fixed_delay() {
        let start = tokio::time::Instant::now();
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let _ = RetryPolicy::default()
            .run(|| async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(MutualsError::RemoteUnavailable { status: 502 })
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(start.elapsed() >= Duration::from_secs(1));
    }

    #[test]
    fn test_from_config() {
        let mut config = Config::default();
        config.retry_attempts = 0;
        config.retry_delay = Duration::from_millis(250);

        let policy = RetryPolicy::from_config(&config);
        assert_eq!(policy.max_attempts, 1);
        assert_eq!(policy.delay, Duration::from_millis(250));
    }
}
