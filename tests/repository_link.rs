//! PostgreSQL link repository tests.
//!
//! Run with a database: `DATABASE_URL=postgres://... cargo test -- --ignored`

use chrono::{Duration, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use url_shortener::AppError;
use url_shortener::domain::entities::NewUrlMapping;
use url_shortener::domain::repositories::LinkRepository;
use url_shortener::error::UniqueKey;
use url_shortener::infrastructure::persistence::PgLinkRepository;

fn new_mapping(short_id: &str, url: &str) -> NewUrlMapping {
    NewUrlMapping {
        short_id: short_id.to_string(),
        original_url: url.to_string(),
        created_at: Utc::now(),
    }
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_create_mapping(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let mapping = repo
        .create(new_mapping("test1234", "https://example.com"))
        .await
        .unwrap();

    assert_eq!(mapping.short_id, "test1234");
    assert_eq!(mapping.original_url, "https://example.com");
    assert_eq!(mapping.clicks, 0);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_create_duplicate_short_id_is_conflict(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    repo.create(new_mapping("dupe1234", "https://example.com/1"))
        .await
        .unwrap();

    let result = repo
        .create(new_mapping("dupe1234", "https://example.com/2"))
        .await;

    assert!(matches!(
        result,
        Err(AppError::Conflict {
            key: UniqueKey::ShortId,
            ..
        })
    ));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_create_duplicate_url_is_conflict(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    repo.create(new_mapping("first123", "https://example.com"))
        .await
        .unwrap();

    let result = repo
        .create(new_mapping("second12", "https://example.com"))
        .await;

    assert!(matches!(
        result,
        Err(AppError::Conflict {
            key: UniqueKey::OriginalUrl,
            ..
        })
    ));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_find_by_short_id_and_url(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    repo.create(new_mapping("find1234", "https://example.com/find"))
        .await
        .unwrap();

    let by_id = repo.find_by_short_id("find1234").await.unwrap();
    let by_url = repo
        .find_by_original_url("https://example.com/find")
        .await
        .unwrap();

    assert_eq!(by_id.unwrap().original_url, "https://example.com/find");
    assert_eq!(by_url.unwrap().short_id, "find1234");
    assert!(repo.find_by_short_id("nothere1").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_delete_mapping(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    repo.create(new_mapping("gone1234", "https://example.com"))
        .await
        .unwrap();

    assert!(repo.delete("gone1234").await.unwrap());
    assert!(!repo.delete("gone1234").await.unwrap());
    assert!(repo.find_by_short_id("gone1234").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_list_newest_first(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    let now = Utc::now();

    for (i, id) in ["list0001", "list0002", "list0003"].iter().enumerate() {
        repo.create(NewUrlMapping {
            short_id: id.to_string(),
            original_url: format!("https://example.com/{}", i),
            created_at: now - Duration::minutes(10 - i as i64),
        })
        .await
        .unwrap();
    }

    let first_page = repo.list(0, 2).await.unwrap();
    let second_page = repo.list(2, 2).await.unwrap();

    let ids: Vec<_> = first_page.iter().map(|m| m.short_id.as_str()).collect();
    assert_eq!(ids, vec!["list0003", "list0002"]);
    assert_eq!(second_page.len(), 1);
    assert_eq!(second_page[0].short_id, "list0001");
}
