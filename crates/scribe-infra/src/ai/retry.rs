//! Retry policy for upstream provider calls.

use std::future::Future;

use scribe_core::ports::ProviderError;

/// Run a provider call with at most one retry.
///
/// The retry fires only on transient transport failures (timeout,
/// unreachable). Provider-reported errors and malformed responses are
/// returned as-is: retrying those either wastes quota or hides a contract
/// break.
pub async fn call_with_retry<T, F, Fut>(op: F) -> Result<T, ProviderError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, ProviderError>>,
{
    match op().await {
        Err(e) if e.is_transient() => {
            tracing::warn!(error = %e, "Provider call failed, retrying once");
            op().await
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    async fn run_counted(
        outcomes: &'static [Result<u32, fn() -> ProviderError>],
        calls: &AtomicU32,
    ) -> Result<u32, ProviderError> {
        let attempt = calls.fetch_add(1, Ordering::SeqCst) as usize;
        let outcome = &outcomes[attempt.min(outcomes.len() - 1)];
        match outcome {
            Ok(v) => Ok(*v),
            Err(make) => Err(make()),
        }
    }

    #[tokio::test]
    async fn transient_failure_gets_exactly_one_retry() {
        static OUTCOMES: [Result<u32, fn() -> ProviderError>; 2] =
            [Err(|| ProviderError::Timeout), Ok(7)];
        let calls = AtomicU32::new(0);

        let result = call_with_retry(|| run_counted(&OUTCOMES, &calls)).await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn persistent_transient_failure_stops_after_second_attempt() {
        static OUTCOMES: [Result<u32, fn() -> ProviderError>; 1] =
            [Err(|| ProviderError::Unreachable("refused".to_string()))];
        let calls = AtomicU32::new(0);

        let result = call_with_retry(|| run_counted(&OUTCOMES, &calls)).await;

        assert!(matches!(result, Err(ProviderError::Unreachable(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn reported_error_is_not_retried() {
        static OUTCOMES: [Result<u32, fn() -> ProviderError>; 2] = [
            Err(|| ProviderError::Reported("quota exceeded".to_string())),
            Ok(1),
        ];
        let calls = AtomicU32::new(0);

        let result = call_with_retry(|| run_counted(&OUTCOMES, &calls)).await;

        assert!(matches!(result, Err(ProviderError::Reported(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn malformed_response_is_not_retried() {
        static OUTCOMES: [Result<u32, fn() -> ProviderError>; 2] =
            [Err(|| ProviderError::Malformed), Ok(1)];
        let calls = AtomicU32::new(0);

        let result = call_with_retry(|| run_counted(&OUTCOMES, &calls)).await;

        assert!(matches!(result, Err(ProviderError::Malformed)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
