//! Business logic services for the application layer.

use std::future::Future;
use std::time::Duration;

use tokio::time::timeout;

use crate::error::AppError;

pub mod link_service;
pub mod stats_service;

pub use link_service::{LinkService, LinkServiceOptions, PageRequest, ShortLink};
pub use stats_service::{Analytics, StatsService};

/// Runs a store call under a deadline.
///
/// Expiry yields a store timeout error naming `operation`; the inner future is dropped.
pub(crate) async fn bounded<T, F>(
    operation: &'static str,
    after: Duration,
    call: F,
) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>>,
{
    match timeout(after, call).await {
        Ok(result) => result,
        Err(_) => Err(AppError::timeout(operation, after)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;

    #[tokio::test]
    async fn test_bounded_passes_result_through() {
        let result = bounded("op", Duration::from_secs(1), async { Ok::<_, AppError>(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_bounded_times_out() {
        let result = bounded("slow_call", Duration::from_millis(50), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, AppError>(())
        })
        .await;

        match result {
            Err(AppError::Store(StoreError::Timeout { operation, after })) => {
                assert_eq!(operation, "slow_call");
                assert_eq!(after, Duration::from_millis(50));
            }
            other => panic!("expected timeout, got {:?}", other),
        }
    }
}
