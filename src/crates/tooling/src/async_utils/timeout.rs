//! Timeout utilities for async operations
//!
//! Deadlines for calls to external collaborators.

use std::future::Future;
use std::time::Duration;
use tokio::time::timeout as tokio_timeout;

/// Execute a fallible async operation with a timeout
///
/// # Example
///
/// ```rust,ignore
/// use tooling::async_utils::timeout::{with_timeout, TimeoutError};
/// use std::time::Duration;
///
/// match with_timeout(Duration::from_secs(5), fetch()).await {
///     Ok(body) => use_body(body),
///     Err(TimeoutError::Timeout(after)) => fallback(after),
///     Err(TimeoutError::OperationFailed(e)) => return Err(e),
/// }
/// ```
pub async fn with_timeout<F, T, E>(
    duration: Duration,
    operation: F,
) -> std::result::Result<T, TimeoutError<E>>
where
    F: Future<Output = std::result::Result<T, E>>,
{
    match tokio_timeout(duration, operation).await {
        Ok(Ok(result)) => Ok(result),
        Ok(Err(error)) => Err(TimeoutError::OperationFailed(error)),
        Err(_elapsed) => Err(TimeoutError::Timeout(duration)),
    }
}

/// Like [`with_timeout`], but logs a warning naming the operation when the
/// deadline elapses.
pub async fn with_deadline<F, T, E>(
    operation_name: &str,
    duration: Duration,
    operation: F,
) -> std::result::Result<T, TimeoutError<E>>
where
    F: Future<Output = std::result::Result<T, E>>,
{
    let result = with_timeout(duration, operation).await;
    if let Err(TimeoutError::Timeout(after)) = &result {
        tracing::warn!(operation = operation_name, "Deadline of {:?} elapsed", after);
    }
    result
}

/// Error type for timeout operations
#[derive(Debug)]
pub enum TimeoutError<E> {
    /// Operation completed but failed
    OperationFailed(E),
    /// Operation timed out
    Timeout(Duration),
}

impl<E> TimeoutError<E> {
    /// Whether the deadline elapsed (as opposed to the operation failing)
    pub fn is_timeout(&self) -> bool {
        matches!(self, TimeoutError::Timeout(_))
    }

    /// Map the inner operation error, keeping timeouts as they are
    pub fn map_err<F, E2>(self, f: F) -> TimeoutError<E2>
    where
        F: FnOnce(E) -> E2,
    {
        match self {
            TimeoutError::OperationFailed(e) => TimeoutError::OperationFailed(f(e)),
            TimeoutError::Timeout(d) => TimeoutError::Timeout(d),
        }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TimeoutError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeoutError::OperationFailed(e) => write!(f, "Operation failed: {}", e),
            TimeoutError::Timeout(d) => write!(f, "Operation timed out after {:?}", d),
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for TimeoutError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TimeoutError::OperationFailed(e) => Some(e),
            TimeoutError::Timeout(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_with_timeout_success() {
        let result: Result<i32, TimeoutError<String>> =
            with_timeout(Duration::from_secs(1), async { Ok(42) }).await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test(start_paused = true)]
    async fn test_with_timeout_exceeded() {
        let result: Result<(), TimeoutError<String>> = with_timeout(Duration::from_millis(50), async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok(())
        })
        .await;

        let err = result.unwrap_err();
        assert!(err.is_timeout());
        assert!(err.to_string().contains("timed out"));
    }

    #[tokio::test]
    async fn test_with_timeout_operation_fails() {
        let result: Result<(), TimeoutError<String>> =
            with_timeout(Duration::from_secs(1), async { Err("boom".to_string()) }).await;

        match result {
            Err(TimeoutError::OperationFailed(msg)) => assert_eq!(msg, "boom"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_with_deadline_reports_timeout() {
        let result: Result<(), TimeoutError<String>> =
            with_deadline("slow_call", Duration::from_millis(10), async {
                tokio::time::sleep(Duration::from_secs(1)).await;
                Ok(())
            })
            .await;

        assert!(matches!(result, Err(TimeoutError::Timeout(d)) if d == Duration::from_millis(10)));
    }

    #[test]
    fn test_map_err_preserves_timeout() {
        let err: TimeoutError<&str> = TimeoutError::OperationFailed("bad");
        assert!(matches!(err.map_err(|e| e.len()), TimeoutError::OperationFailed(3)));

        let err: TimeoutError<&str> = TimeoutError::Timeout(Duration::from_secs(2));
        assert!(err.map_err(|e| e.len()).is_timeout());
    }
}
