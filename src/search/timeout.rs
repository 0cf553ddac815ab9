//! Timeout race for provider attempts

use crate::error::ProviderError;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

/// Resolve to a timeout error once `after` has elapsed
///
/// Always settles, so a race against it always finishes.
pub async fn expire<T>(after: Duration) -> Result<T, ProviderError> {
    sleep(after).await;
    Err(ProviderError::Timeout(after))
}

/// Race `call` against [`expire`]; whichever settles first wins
///
/// The losing future is dropped. Callers that must not cancel the work
/// behind `call` should hand in a detached task's join handle rather than
/// the work itself.
pub async fn race<T, F>(call: F, after: Duration) -> Result<T, ProviderError>
where
    F: Future<Output = Result<T, ProviderError>>,
{
    tokio::select! {
        biased;
        result = call => result,
        expired = expire(after) => expired,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_expire_settles() {
        let err = expire::<()>(Duration::from_secs(30)).await.unwrap_err();
        assert_eq!(err, ProviderError::Timeout(Duration::from_secs(30)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fast_call_wins() {
        let result = race(async { Ok(7) }, Duration::from_secs(1)).await;
        assert_eq!(result, Ok(7));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failing_call_wins() {
        let result: Result<(), _> = race(
            async { Err(ProviderError::Other("boom".into())) },
            Duration::from_secs(1),
        )
        .await;
        assert_eq!(result, Err(ProviderError::Other("boom".into())));
    }

    #[tokio::test(start_paused = true)]
    async fn test_hanging_call_times_out() {
        let started = tokio::time::Instant::now();
        let result: Result<(), _> =
            race(std::future::pending(), Duration::from_secs(30)).await;

        assert_eq!(result, Err(ProviderError::Timeout(Duration::from_secs(30))));
        assert!(started.elapsed() >= Duration::from_secs(30));
    }
}
