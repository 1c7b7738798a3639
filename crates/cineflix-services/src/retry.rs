use cineflix_config::RetryConfig;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Exponential backoff settings: waits `initial_delay * 2^(attempt-1)` between attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryOptions {
    pub max_attempts: u32,
    pub initial_delay: Duration,
}

impl Default for RetryOptions {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(1000),
        }
    }
}

impl From<&RetryConfig> for RetryOptions {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            initial_delay: config.initial_delay(),
        }
    }
}

impl RetryOptions {
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.initial_delay
            .saturating_mul(2u32.saturating_pow(attempt.saturating_sub(1)))
    }
}

/// Run `operation` until it succeeds, retrying every failure
pub async fn retry_operation<T, E, F, Fut>(operation: F, options: RetryOptions) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    retry_operation_if(operation, options, |_| true).await
}

/// Like [`retry_operation`], but gives up at once on failures `should_retry` rejects
pub async fn retry_operation_if<T, E, F, Fut, P>(
    mut operation: F,
    options: RetryOptions,
    should_retry: P,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
    P: Fn(&E) -> bool,
{
    let max_attempts = options.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                if attempt >= max_attempts || !should_retry(&e) {
                    return Err(e);
                }
                let delay = options.delay_for(attempt);
                warn!(
                    error = %e,
                    "Operation failed (attempt {}/{}), retrying in {}ms...",
                    attempt,
                    max_attempts,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use std::sync::{Arc, Mutex};
    use tokio::time::Instant;

    fn assert_delay(actual: Duration, expected: Duration) {
        assert!(
            actual >= expected && actual < expected + Duration::from_millis(5),
            "expected ~{:?}, got {:?}",
            expected,
            actual
        );
    }

    fn options() -> RetryOptions {
        RetryOptions {
            max_attempts: 3,
            initial_delay: Duration::from_millis(1000),
        }
    }

    /// Operation failing `failures` times before succeeding, recording when each attempt ran
    fn flaky(failures: usize, attempts: Arc<Mutex<Vec<Instant>>>) -> impl FnMut() -> std::future::Ready<Result<&'static str, ServiceError>> {
        move || {
            let mut attempts = attempts.lock().unwrap();
            attempts.push(Instant::now());
            if attempts.len() <= failures {
                std::future::ready(Err(ServiceError::Transport("connection refused".to_string())))
            } else {
                std::future::ready(Ok("done"))
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_after_failures_with_doubling_delays() {
        let attempts = Arc::new(Mutex::new(Vec::new()));
        let start = Instant::now();

        let result = retry_operation(flaky(2, attempts.clone()), options()).await;
        assert_eq!(result.unwrap(), "done");

        let attempts = attempts.lock().unwrap();
        assert_eq!(attempts.len(), 3);
        assert_eq!(attempts[0] - start, Duration::ZERO);
        assert_delay(attempts[1] - attempts[0], Duration::from_millis(1000));
        assert_delay(attempts[2] - attempts[1], Duration::from_millis(2000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_always_failing_returns_last_error_after_max_attempts() {
        let calls = Arc::new(Mutex::new(0u32));
        let counter = calls.clone();

        let result: Result<(), ServiceError> = retry_operation(
            move || {
                let mut calls = counter.lock().unwrap();
                *calls += 1;
                std::future::ready(Err(ServiceError::Status {
                    status: 500 + *calls as u16,
                    body: String::new(),
                }))
            },
            options(),
        )
        .await;

        assert_eq!(*calls.lock().unwrap(), 3);
        assert_eq!(result.unwrap_err().status(), Some(503));
    }

    #[tokio::test(start_paused = true)]
    async fn test_immediate_success_does_not_wait() {
        let attempts = Arc::new(Mutex::new(Vec::new()));
        let start = Instant::now();

        let result = retry_operation(flaky(0, attempts.clone()), options()).await;
        assert!(result.is_ok());
        assert_eq!(attempts.lock().unwrap().len(), 1);
        assert_eq!(Instant::now() - start, Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_predicate_stops_on_permanent_error() {
        let calls = Arc::new(Mutex::new(0u32));
        let counter = calls.clone();

        let result: Result<(), ServiceError> = retry_operation_if(
            move || {
                *counter.lock().unwrap() += 1;
                std::future::ready(Err(ServiceError::Status {
                    status: 404,
                    body: String::new(),
                }))
            },
            options(),
            ServiceError::is_transient,
        )
        .await;

        assert!(result.is_err());
        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[test]
    fn test_delay_schedule() {
        let options = RetryOptions {
            max_attempts: 5,
            initial_delay: Duration::from_millis(250),
        };
        assert_eq!(options.delay_for(1), Duration::from_millis(250));
        assert_eq!(options.delay_for(2), Duration::from_millis(500));
        assert_eq!(options.delay_for(4), Duration::from_millis(2000));
    }

    #[test]
    fn test_options_from_config() {
        let config = RetryConfig {
            max_attempts: 0,
            initial_delay_ms: 50,
        };
        let options = RetryOptions::from(&config);
        assert_eq!(options.max_attempts, 1);
        assert_eq!(options.initial_delay, Duration::from_millis(50));
    }
}
