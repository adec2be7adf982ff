#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum_test::TestServer;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tower::ServiceExt;
use url_shortener::api::routes::api_routes;
use url_shortener::application::services::LinkServiceOptions;
use url_shortener::domain::click_event::ClickEvent;
use url_shortener::domain::click_worker::run_click_worker;
use url_shortener::domain::entities::NewUrlMapping;
use url_shortener::domain::repositories::{LinkRepository, StatsRepository};
use url_shortener::infrastructure::cache::NullCache;
use url_shortener::infrastructure::persistence::MemoryStore;
use url_shortener::state::AppState;

pub const PUBLIC_HOST: &str = "localhost:8080";

pub fn test_options() -> LinkServiceOptions {
    LinkServiceOptions {
        public_scheme: "http".to_string(),
        public_host: PUBLIC_HOST.to_string(),
        store_timeout: Duration::from_secs(5),
    }
}

/// Memory-backed state. The receiver stands in for the click worker.
pub fn create_test_state(
    store: Arc<MemoryStore>,
) -> (AppState, mpsc::Receiver<ClickEvent>) {
    let (tx, rx) = mpsc::channel(100);

    let state = AppState::new(
        store.clone(),
        store,
        Arc::new(NullCache::new()),
        tx,
        test_options(),
    );

    (state, rx)
}

pub fn router(state: AppState) -> Router {
    api_routes().with_state(state)
}

/// Server whose click events are left in the returned receiver.
pub fn spawn_app() -> (TestServer, Arc<MemoryStore>, mpsc::Receiver<ClickEvent>) {
    let store = Arc::new(MemoryStore::new());
    let (state, rx) = create_test_state(store.clone());
    let server = TestServer::new(router(state)).unwrap();
    (server, store, rx)
}

/// Server with a running click worker applying increments to the store.
pub fn spawn_app_with_worker() -> (TestServer, Arc<MemoryStore>) {
    let (app, store) = spawn_router_with_worker();
    let server = TestServer::new(app).unwrap();
    (server, store)
}

/// Router with a running click worker, for tests that fan requests out
/// across tasks.
pub fn spawn_router_with_worker() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let (state, rx) = create_test_state(store.clone());
    tokio::spawn(run_click_worker(
        rx,
        store.clone(),
        4,
        Duration::from_secs(5),
    ));
    (router(state), store)
}

/// Sends a single request through a clone of the router.
pub async fn call(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn create_test_mapping(
    store: &MemoryStore,
    short_id: &str,
    url: &str,
    created_at: DateTime<Utc>,
    clicks: usize,
) {
    store
        .create(NewUrlMapping {
            short_id: short_id.to_string(),
            original_url: url.to_string(),
            created_at,
        })
        .await
        .unwrap();

    for _ in 0..clicks {
        store.increment_clicks(short_id).await.unwrap();
    }
}

/// Timestamp `minutes` before now.
pub fn minutes_ago(minutes: i64) -> DateTime<Utc> {
    Utc::now() - ChronoDuration::minutes(minutes)
}

/// Polls the store until `short_id` has at least `expected` clicks.
pub async fn wait_for_clicks(store: &MemoryStore, short_id: &str, expected: i64) -> i64 {
    for _ in 0..200 {
        let clicks = store
            .find_by_short_id(short_id)
            .await
            .unwrap()
            .map(|m| m.clicks)
            .unwrap_or(0);
        if clicks >= expected {
            return clicks;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("{} never reached {} clicks", short_id, expected);
}
