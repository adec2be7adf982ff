//! Aggregate analytics over the mapping store.

use std::sync::Arc;
use std::time::Duration;

use super::bounded;
use crate::domain::repositories::StatsRepository;
use crate::error::AppError;

/// Store-wide totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Analytics {
    pub total_urls: i64,
    pub total_clicks: i64,
}

/// Service for analytics and store reachability checks.
pub struct StatsService {
    stats_repository: Arc<dyn StatsRepository>,
    store_timeout: Duration,
}

impl StatsService {
    /// Creates a new stats service.
    pub fn new(stats_repository: Arc<dyn StatsRepository>, store_timeout: Duration) -> Self {
        Self {
            stats_repository,
            store_timeout,
        }
    }

    /// Returns the number of mappings and the sum of their click counters.
    ///
    /// Both aggregates are queried concurrently. Either failing fails the
    /// whole call; a partial result is never returned.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on storage errors or timeouts.
    pub async fn analytics(&self) -> Result<Analytics, AppError> {
        let (total_urls, total_clicks) = tokio::try_join!(
            bounded(
                "count_mappings",
                self.store_timeout,
                self.stats_repository.count_mappings()
            ),
            bounded(
                "sum_clicks",
                self.store_timeout,
                self.stats_repository.sum_clicks()
            ),
        )?;

        Ok(Analytics {
            total_urls,
            total_clicks,
        })
    }

    /// Runs a cheap aggregate to confirm the store answers.
    pub async fn check_store(&self) -> Result<(), AppError> {
        bounded(
            "count_mappings",
            self.store_timeout,
            self.stats_repository.count_mappings(),
        )
        .await
        .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockStatsRepository;

    fn service(repo: MockStatsRepository) -> StatsService {
        StatsService::new(Arc::new(repo), Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_analytics_totals() {
        let mut repo = MockStatsRepository::new();
        repo.expect_count_mappings().times(1).returning(|| Ok(3));
        repo.expect_sum_clicks().times(1).returning(|| Ok(8));

        let analytics = service(repo).analytics().await.unwrap();

        assert_eq!(
            analytics,
            Analytics {
                total_urls: 3,
                total_clicks: 8
            }
        );
    }

    #[tokio::test]
    async fn test_analytics_empty_store() {
        let mut repo = MockStatsRepository::new();
        repo.expect_count_mappings().returning(|| Ok(0));
        repo.expect_sum_clicks().returning(|| Ok(0));

        let analytics = service(repo).analytics().await.unwrap();

        assert_eq!(analytics, Analytics::default());
    }

    #[tokio::test]
    async fn test_analytics_fails_when_count_fails() {
        let mut repo = MockStatsRepository::new();
        repo.expect_count_mappings()
            .returning(|| Err(AppError::store("connection reset")));
        repo.expect_sum_clicks().returning(|| Ok(8));

        let result = service(repo).analytics().await;

        assert!(matches!(result, Err(AppError::Store(_))));
    }

    #[tokio::test]
    async fn test_analytics_fails_when_sum_fails() {
        let mut repo = MockStatsRepository::new();
        repo.expect_count_mappings().returning(|| Ok(3));
        repo.expect_sum_clicks()
            .returning(|| Err(AppError::store("connection reset")));

        let result = service(repo).analytics().await;

        assert!(matches!(result, Err(AppError::Store(_))));
    }

    #[tokio::test]
    async fn test_check_store() {
        let mut repo = MockStatsRepository::new();
        repo.expect_count_mappings().times(1).returning(|| Ok(0));

        assert!(service(repo).check_store().await.is_ok());
    }
}
