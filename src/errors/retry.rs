use std::time::Duration;
use std::future::Future;

use super::classification::ErrorClassification;
use super::types::DashboardError;
use tracing::warn;

impl ErrorClassification {
    /// Delay before the retry that follows the 0-indexed `attempt`.
    ///
    /// Linear backoff: `base * (attempt + 1)`, so the first retry waits one
    /// base interval, the second two, and so on.
    pub fn retry_delay(&self, base: Duration, attempt: u32) -> Duration {
        base * (attempt + 1)
    }
}

/// Retry configuration for dashboard client requests.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

/// Execute an async operation with retry logic.
///
/// Retries only if the error is classified as retryable and attempts remain.
pub async fn with_retry<F, Fut, T>(
    operation_name: &str,
    config: &RetryConfig,
    mut factory: F,
) -> Result<T, DashboardError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DashboardError>>,
{
    let max_attempts = config.max_attempts.max(1);
    let mut last_error = None;

    for attempt in 0..max_attempts {
        match factory().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                let classification = e.classify();

                if !classification.retryable || attempt + 1 >= max_attempts {
                    if !classification.retryable {
                        warn!(
                            operation = operation_name,
                            error_type = classification.error_type,
                            "Non-retryable error, failing immediately"
                        );
                    } else {
                        warn!(
                            operation = operation_name,
                            attempt = attempt + 1,
                            max = max_attempts,
                            "Max retries exhausted"
                        );
                    }
                    return Err(e);
                }

                let delay = classification.retry_delay(config.base_delay, attempt);
                warn!(
                    operation = operation_name,
                    attempt = attempt + 1,
                    max = max_attempts,
                    error_type = classification.error_type,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Retrying after error"
                );

                tokio::time::sleep(delay).await;
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| DashboardError::Internal("Retry loop exited unexpectedly".into())))
}
