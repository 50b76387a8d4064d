//! Retry with exponential backoff for transient transport failures.

use std::future::Future;
use std::time::Duration;

use crate::error::OffersError;

/// Retry policy configuration.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first).
    pub max_attempts: u32,
    /// Initial backoff duration.
    pub initial_backoff: Duration,
    /// Maximum backoff duration per wait.
    pub max_backoff: Duration,
    /// Backoff multiplier.
    pub multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(5),
            multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// Execute an async operation, retrying transient failures.
    ///
    /// Only errors for which [`OffersError::is_transient`] holds are retried;
    /// everything else propagates on first occurrence. The final attempt's
    /// failure propagates unchanged.
    pub async fn execute<F, Fut, T>(&self, mut operation: F) -> Result<T, OffersError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, OffersError>>,
    {
        let mut backoff = self.initial_backoff;
        let mut last_error = None;

        for attempt in 0..self.max_attempts {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    if !e.is_transient() || attempt + 1 >= self.max_attempts {
                        return Err(e);
                    }

                    tracing::warn!(
                        attempt = attempt + 1,
                        max_attempts = self.max_attempts,
                        error = %e,
                        "retrying after transient transport failure"
                    );

                    tokio::time::sleep(backoff).await;

                    backoff = Duration::from_secs_f64(
                        (backoff.as_secs_f64() * self.multiplier)
                            .min(self.max_backoff.as_secs_f64()),
                    );

                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| OffersError::Execution("retry attempts exhausted".into())))
    }
}
