use std::future::Future;
use std::time::Duration;

use crate::domain::errors::StoreError;

/// Runs one store call under a deadline, mapping expiry to [`StoreError::Timeout`].
pub(crate) async fn with_deadline<T, F>(limit: Duration, call: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    tokio::time::timeout(limit, call)
        .await
        .map_err(|_| StoreError::Timeout(limit))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_slow_call_times_out() {
        let result: Result<(), StoreError> = with_deadline(Duration::from_secs(2), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await;

        assert!(matches!(result, Err(StoreError::Timeout(d)) if d == Duration::from_secs(2)));
    }

    #[tokio::test]
    async fn test_fast_call_passes_through() {
        let result = with_deadline(Duration::from_secs(2), async { Ok(7) }).await;

        assert_eq!(result.unwrap(), 7);
    }
}
