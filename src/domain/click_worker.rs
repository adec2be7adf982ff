//! Background worker that applies queued click increments.

use std::sync::Arc;
use std::time::Duration;

use metrics::counter;
use tokio::sync::{Semaphore, mpsc};
use tokio::time::timeout;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, info, warn};

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::StatsRepository;
use crate::error::{AppError, StoreError};

/// Retries after the first failed increment.
const MAX_RETRIES: usize = 3;

/// Consumes click events until the channel closes.
///
/// At most `concurrency` increments run at once. After the last sender is
/// dropped the worker waits for in-flight increments and returns, which makes
/// awaiting its handle a drain step during shutdown.
///
/// Failures are logged and counted, never reported back to the resolution
/// that produced the event.
pub async fn run_click_worker(
    mut rx: mpsc::Receiver<ClickEvent>,
    stats_repository: Arc<dyn StatsRepository>,
    concurrency: usize,
    store_timeout: Duration,
) {
    let permits = Arc::new(Semaphore::new(concurrency));

    while let Some(event) = rx.recv().await {
        let Ok(permit) = permits.clone().acquire_owned().await else {
            break;
        };

        let repository = stats_repository.clone();
        tokio::spawn(async move {
            record_click(repository.as_ref(), &event.short_id, store_timeout).await;
            drop(permit);
        });
    }

    let _ = permits.acquire_many(concurrency as u32).await;
    info!("Click worker stopped");
}

async fn record_click(repository: &dyn StatsRepository, short_id: &str, store_timeout: Duration) {
    let strategy = ExponentialBackoff::from_millis(2)
        .factor(5)
        .map(jitter)
        .take(MAX_RETRIES);

    // A timed-out increment may still have been applied, so it is not retried.
    let result = RetryIf::spawn(
        strategy,
        move || async move {
            match timeout(store_timeout, repository.increment_clicks(short_id)).await {
                Ok(result) => result,
                Err(_) => Err(AppError::timeout("increment_clicks", store_timeout)),
            }
        },
        |e: &AppError| !matches!(e, AppError::Store(StoreError::Timeout { .. })),
    )
    .await;

    match result {
        Ok(true) => {
            counter!("clicks_recorded_total").increment(1);
        }
        Ok(false) => {
            debug!(short_id, "Mapping deleted before its click was recorded");
        }
        Err(e) => {
            counter!("clicks_failed_total").increment(1);
            warn!(short_id, error = %e, "Failed to record click");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingRepository {
        clicks: AtomicI64,
        calls: AtomicUsize,
        failures_left: AtomicUsize,
        delay: Option<Duration>,
    }

    #[async_trait]
    impl StatsRepository for CountingRepository {
        async fn increment_clicks(&self, _short_id: &str) -> Result<bool, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self
                .failures_left
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
            {
                return Err(AppError::store("connection reset"));
            }
            self.clicks.fetch_add(1, Ordering::SeqCst);
            Ok(true)
        }

        async fn count_mappings(&self) -> Result<i64, AppError> {
            Ok(1)
        }

        async fn sum_clicks(&self) -> Result<i64, AppError> {
            Ok(self.clicks.load(Ordering::SeqCst))
        }
    }

    async fn run_events(
        repository: Arc<CountingRepository>,
        events: usize,
        store_timeout: Duration,
    ) {
        let (tx, rx) = mpsc::channel(128);
        let worker = tokio::spawn(run_click_worker(rx, repository, 4, store_timeout));

        for _ in 0..events {
            tx.send(ClickEvent::new("abcd1234")).await.unwrap();
        }
        drop(tx);

        worker.await.unwrap();
    }

    #[tokio::test]
    async fn test_worker_applies_every_click() {
        let repository = Arc::new(CountingRepository::default());

        run_events(repository.clone(), 25, Duration::from_secs(5)).await;

        assert_eq!(repository.clicks.load(Ordering::SeqCst), 25);
    }

    #[tokio::test]
    async fn test_worker_retries_failed_increment() {
        let repository = Arc::new(CountingRepository {
            failures_left: AtomicUsize::new(2),
            ..Default::default()
        });

        run_events(repository.clone(), 1, Duration::from_secs(5)).await;

        assert_eq!(repository.clicks.load(Ordering::SeqCst), 1);
        assert_eq!(repository.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_worker_gives_up_after_max_retries() {
        let repository = Arc::new(CountingRepository {
            failures_left: AtomicUsize::new(100),
            ..Default::default()
        });

        run_events(repository.clone(), 1, Duration::from_secs(5)).await;

        assert_eq!(repository.clicks.load(Ordering::SeqCst), 0);
        assert_eq!(repository.calls.load(Ordering::SeqCst), MAX_RETRIES + 1);
    }

    #[tokio::test]
    async fn test_worker_does_not_retry_timeouts() {
        let repository = Arc::new(CountingRepository {
            delay: Some(Duration::from_millis(200)),
            ..Default::default()
        });

        run_events(repository.clone(), 1, Duration::from_millis(20)).await;

        assert_eq!(repository.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_worker_stops_when_channel_closes() {
        let repository = Arc::new(CountingRepository::default());

        run_events(repository.clone(), 0, Duration::from_secs(5)).await;

        assert_eq!(repository.calls.load(Ordering::SeqCst), 0);
    }
}
