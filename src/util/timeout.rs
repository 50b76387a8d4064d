//! Timeout helper for backends whose HTTP client has no built-in deadline.

use std::future::Future;
use std::time::Duration;

use crate::error::OffersError;

/// Wrap a future with a timeout.
///
/// An elapsed deadline surfaces as a transport execution failure so it is
/// eligible for the transport retry policy, like any other network fault.
pub async fn with_timeout<T>(
    duration: Duration,
    future: impl Future<Output = Result<T, OffersError>>,
) -> Result<T, OffersError> {
    match tokio::time::timeout(duration, future).await {
        Ok(result) => result,
        Err(_) => Err(OffersError::Execution(format!(
            "request timed out after {}ms",
            duration.as_millis()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn passes_through_before_deadline() {
        let result = with_timeout(Duration::from_secs(1), async { Ok(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn elapsed_deadline_is_an_execution_error() {
        let result: Result<(), OffersError> = with_timeout(Duration::from_millis(5), async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok(())
        })
        .await;
        assert!(matches!(result, Err(OffersError::Execution(_))));
    }
}
