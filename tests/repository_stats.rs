//! PostgreSQL stats repository tests.
//!
//! Run with a database: `DATABASE_URL=postgres://... cargo test -- --ignored`

use chrono::Utc;
use sqlx::PgPool;
use std::sync::Arc;
use url_shortener::domain::entities::NewUrlMapping;
use url_shortener::domain::repositories::{LinkRepository, StatsRepository};
use url_shortener::infrastructure::persistence::{PgLinkRepository, PgStatsRepository};

async fn seed(pool: &PgPool, short_id: &str, url: &str) {
    PgLinkRepository::new(Arc::new(pool.clone()))
        .create(NewUrlMapping {
            short_id: short_id.to_string(),
            original_url: url.to_string(),
            created_at: Utc::now(),
        })
        .await
        .unwrap();
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_empty_aggregates(pool: PgPool) {
    let repo = PgStatsRepository::new(Arc::new(pool));

    assert_eq!(repo.count_mappings().await.unwrap(), 0);
    assert_eq!(repo.sum_clicks().await.unwrap(), 0);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_increment_clicks(pool: PgPool) {
    seed(&pool, "click123", "https://example.com").await;
    let repo = PgStatsRepository::new(Arc::new(pool.clone()));

    for _ in 0..3 {
        assert!(repo.increment_clicks("click123").await.unwrap());
    }

    let clicks: i64 = sqlx::query_scalar("SELECT clicks FROM url_mappings WHERE short_id = $1")
        .bind("click123")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(clicks, 3);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_increment_missing_mapping(pool: PgPool) {
    let repo = PgStatsRepository::new(Arc::new(pool));

    assert!(!repo.increment_clicks("nothere1").await.unwrap());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_concurrent_increments(pool: PgPool) {
    seed(&pool, "race1234", "https://example.com").await;
    let repo = Arc::new(PgStatsRepository::new(Arc::new(pool)));

    let handles: Vec<_> = (0..50)
        .map(|_| {
            let repo = repo.clone();
            tokio::spawn(async move { repo.increment_clicks("race1234").await.unwrap() })
        })
        .collect();
    for handle in handles {
        assert!(handle.await.unwrap());
    }

    assert_eq!(repo.sum_clicks().await.unwrap(), 50);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_aggregates(pool: PgPool) {
    seed(&pool, "agg00001", "https://example.com/1").await;
    seed(&pool, "agg00002", "https://example.com/2").await;
    seed(&pool, "agg00003", "https://example.com/3").await;
    let repo = PgStatsRepository::new(Arc::new(pool));

    for _ in 0..3 {
        repo.increment_clicks("agg00001").await.unwrap();
    }
    for _ in 0..5 {
        repo.increment_clicks("agg00003").await.unwrap();
    }

    assert_eq!(repo.count_mappings().await.unwrap(), 3);
    assert_eq!(repo.sum_clicks().await.unwrap(), 8);
}
