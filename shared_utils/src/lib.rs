use std::time::Duration;

use tokio_retry::{strategy::ExponentialBackoff, RetryIf};
use tracing::{error, warn};

/// Configuration for retry behavior when invoking asynchronous operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    pub initial_delay_millis: u64,
    pub max_delay_secs: u64,
    pub max_retries: u32,
}

impl RetryConfig {
    #[must_use]
    pub fn new(initial_delay_millis: u64, max_delay_secs: u64, max_retries: u32) -> Self {
        Self {
            initial_delay_millis,
            max_delay_secs,
            max_retries,
        }
    }

    /// Same backoff curve, different attempt budget.
    #[must_use]
    pub fn with_max_retries(self, max_retries: u32) -> Self {
        Self {
            max_retries,
            ..self
        }
    }

    fn strategy(&self) -> impl Iterator<Item = Duration> + Clone {
        ExponentialBackoff::from_millis(self.initial_delay_millis)
            .max_delay(Duration::from_secs(self.max_delay_secs))
            .take(self.max_retries as usize)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            initial_delay_millis: 50,
            max_delay_secs: 2,
            max_retries: 3,
        }
    }
}

/// Execute an asynchronous operation, retrying with backoff while `should_retry`
/// accepts the error.
///
/// Errors rejected by `should_retry` are returned immediately. `context` is
/// included in log messages to provide call-site visibility.
pub async fn retry_async_when<F, Fut, T, E, C>(
    context: &str,
    config: RetryConfig,
    mut operation: F,
    mut should_retry: C,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: std::fmt::Debug,
    C: FnMut(&E) -> bool,
{
    let strategy = config.strategy();
    let result = RetryIf::start(
        strategy,
        || {
            let fut = operation();
            async move {
                match fut.await {
                    Ok(value) => Ok(value),
                    Err(err) => {
                        warn!(error = ?err, retry_context = context, "Operation failed");
                        Err(err)
                    }
                }
            }
        },
        |err: &E| should_retry(err),
    )
    .await;

    if let Err(err) = &result {
        error!(
            error = ?err,
            retry_context = context,
            "Operation failed; giving up"
        );
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Debug, PartialEq)]
    enum Failure {
        Transient,
        Permanent,
    }

    #[test]
    fn succeeds_after_retries() {
        tokio_test::block_on(async {
            let attempts = Arc::new(AtomicUsize::new(0));
            let tracker = attempts.clone();

            let result = retry_async_when(
                "test_success",
                RetryConfig::new(1, 1, 3),
                move || {
                    let tracker = tracker.clone();
                    async move {
                        let current = tracker.fetch_add(1, Ordering::SeqCst);
                        if current < 2 {
                            Err(Failure::Transient)
                        } else {
                            Ok("ok")
                        }
                    }
                },
                |err| *err == Failure::Transient,
            )
            .await;

            assert_eq!(result.unwrap(), "ok");
            assert_eq!(attempts.load(Ordering::SeqCst), 3);
        });
    }

    #[test]
    fn returns_error_after_exhausting_retries() {
        tokio_test::block_on(async {
            let attempts = Arc::new(AtomicUsize::new(0));
            let tracker = attempts.clone();

            let config = RetryConfig::new(1, 1, 3);
            let result: Result<(), Failure> = retry_async_when(
                "test_failure",
                config,
                move || {
                    let tracker = tracker.clone();
                    async move {
                        tracker.fetch_add(1, Ordering::SeqCst);
                        Err(Failure::Transient)
                    }
                },
                |_| true,
            )
            .await;

            assert!(result.is_err());
            assert_eq!(
                attempts.load(Ordering::SeqCst),
                config.max_retries as usize + 1
            );
        });
    }

    #[test]
    fn permanent_errors_are_not_retried() {
        tokio_test::block_on(async {
            let attempts = Arc::new(AtomicUsize::new(0));
            let tracker = attempts.clone();

            let result: Result<(), Failure> = retry_async_when(
                "test_permanent",
                RetryConfig::new(1, 1, 5),
                move || {
                    let tracker = tracker.clone();
                    async move {
                        tracker.fetch_add(1, Ordering::SeqCst);
                        Err(Failure::Permanent)
                    }
                },
                |err| *err == Failure::Transient,
            )
            .await;

            assert_eq!(result, Err(Failure::Permanent));
            assert_eq!(attempts.load(Ordering::SeqCst), 1);
        });
    }

    #[test]
    fn zero_retries_runs_once() {
        tokio_test::block_on(async {
            let attempts = Arc::new(AtomicUsize::new(0));
            let tracker = attempts.clone();

            let config = RetryConfig::default().with_max_retries(0);
            let _: Result<(), Failure> = retry_async_when(
                "test_zero",
                config,
                move || {
                    let tracker = tracker.clone();
                    async move {
                        tracker.fetch_add(1, Ordering::SeqCst);
                        Err(Failure::Transient)
                    }
                },
                |_| true,
            )
            .await;

            assert_eq!(attempts.load(Ordering::SeqCst), 1);
        });
    }
}
