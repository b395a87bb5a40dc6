
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use jobboard_lite::config::{FallbackConfig, StoreConfig};
use jobboard_lite::gateway::FetchWithFixtureFallback;
use jobboard_lite::model::{fixture_jobs, Facet, FilterUpdate};
use jobboard_lite::pagination::PageMarker;
use jobboard_lite::store::ViewMode;
use jobboard_lite::JobStore;

use test_harness::{store_with, token, StubGateway};

fn fallback_store(stub: Arc<StubGateway>, swallow_write_failures: bool) -> JobStore {
    let config = FallbackConfig {
        enabled: true,
        swallow_write_failures,
    };
    JobStore::new(
        Arc::new(FetchWithFixtureFallback::new(stub, &config)),
        &StoreConfig::default(),
    )
}

#[tokio::test]
async fn test_load_jobs_populates_view() {
    let stub = Arc::new(StubGateway::with_fixtures());
    let store = store_with(stub, 3);

    store.load_jobs().await;

    let state = store.snapshot().await;
    assert_eq!(state.jobs.len(), 8);
    assert_eq!(state.filtered_jobs, state.jobs);
    assert_eq!(state.pagination.total_pages, 3);
    assert_eq!(state.pagination.current_page, 1);
    assert!(!state.is_loading);
    assert!(state.error.is_none());
}

#[tokio::test]
async fn test_load_jobs_failure_keeps_previous_jobs() {
    let stub = Arc::new(StubGateway::with_fixtures());
    let store = store_with(stub.clone(), 12);
    store.load_jobs().await;

    stub.fail_reads(true);
    store.load_jobs().await;

    let state = store.snapshot().await;
    assert_eq!(state.jobs.len(), 8);
    assert!(!state.is_loading);
    assert_eq!(
        state.error.as_deref(),
        Some("Transport error: connection refused")
    );

    // The next successful load clears the error
    stub.fail_reads(false);
    store.load_jobs().await;
    assert!(store.read(|s| s.error.is_none()).await);
}

#[tokio::test]
async fn test_load_jobs_keeps_active_filters() {
    let stub = Arc::new(StubGateway::with_fixtures());
    let store = store_with(stub, 12);

    store
        .set_filters([FilterUpdate::facet(Facet::JobType, ["Contract"])])
        .await;
    store.load_jobs().await;

    let ids: Vec<u64> = store.current_page_jobs().await.iter().map(|j| j.id).collect();
    assert_eq!(ids, vec![3]);
}

#[tokio::test]
async fn test_load_job_by_id() {
    let stub = Arc::new(StubGateway::with_fixtures());
    let store = store_with(stub, 12);

    store.load_job_by_id(6).await;
    let current = store.read(|s| s.current_job.clone()).await;
    assert_eq!(current.map(|j| j.title), Some("Data Scientist".to_string()));

    store.load_job_by_id(99).await;
    let state = store.snapshot().await;
    assert_eq!(state.error.as_deref(), Some("Job not found: 99"));
    assert!(!state.is_loading);
    // The previously loaded job stays current
    assert_eq!(state.current_job.map(|j| j.id), Some(6));
}

#[tokio::test]
async fn test_load_saved_and_applied_jobs() {
    let jobs = fixture_jobs();
    let stub = Arc::new(
        StubGateway::with_fixtures()
            .with_saved(vec![jobs[1].clone()])
            .with_applied(vec![jobs[6].clone(), jobs[7].clone()]),
    );
    let store = store_with(stub, 12);
    let token = token();

    store.load_saved_jobs(&token).await;
    store.load_applied_jobs(&token).await;

    assert!(store.is_saved(2).await);
    assert!(!store.is_saved(1).await);
    assert!(store.has_applied(7).await);
    assert!(store.has_applied(8).await);
    assert!(!store.has_applied(2).await);
}

#[tokio::test]
async fn test_save_and_unsave() {
    let stub = Arc::new(StubGateway::with_fixtures());
    let store = store_with(stub.clone(), 12);
    let token = token();
    store.load_jobs().await;

    store.save_job(4, &token).await;
    assert!(store.is_saved(4).await);

    store.unsave_job(4, &token).await;
    assert!(!store.is_saved(4).await);
    assert_eq!(stub.write_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_save_unknown_job_is_not_recorded() {
    let stub = Arc::new(StubGateway::with_fixtures());
    let store = store_with(stub, 12);
    store.load_jobs().await;

    store.save_job(42, &token()).await;

    let state = store.snapshot().await;
    assert!(state.saved_jobs.is_empty());
    assert!(state.error.is_none());
}

#[tokio::test]
async fn test_save_failure_sets_error() {
    let stub = Arc::new(StubGateway::with_fixtures());
    let store = store_with(stub.clone(), 12);
    store.load_jobs().await;

    stub.fail_writes(true);
    store.save_job(1, &token()).await;

    let state = store.snapshot().await;
    assert!(state.saved_jobs.is_empty());
    assert_eq!(state.error.as_deref(), Some("API error 500: write rejected"));
}

#[tokio::test]
async fn test_concurrent_saves_record_once() {
    let stub = Arc::new(StubGateway::with_fixtures().with_write_delay(Duration::from_millis(20)));
    let store = store_with(stub.clone(), 12);
    let token = token();
    store.load_jobs().await;

    tokio::join!(store.save_job(3, &token), store.save_job(3, &token));

    assert_eq!(stub.write_calls.load(Ordering::SeqCst), 2);
    let saved = store.read(|s| s.saved_jobs.len()).await;
    assert_eq!(saved, 1);
}

#[tokio::test]
async fn test_apply_records_application_once() {
    let stub = Arc::new(StubGateway::with_fixtures());
    let store = store_with(stub, 12);
    let token = token();
    store.load_jobs().await;

    store.apply_to_job(5, &token).await;
    store.apply_to_job(5, &token).await;

    assert!(store.has_applied(5).await);
    assert_eq!(store.read(|s| s.applied_jobs.len()).await, 1);
}

#[tokio::test]
async fn test_pagination_actions() {
    let stub = Arc::new(StubGateway::with_fixtures());
    let store = store_with(stub, 2);
    store.load_jobs().await;

    assert_eq!(store.read(|s| s.pagination.total_pages).await, 4);
    assert_eq!(store.set_page(3).await, 3);
    let ids: Vec<u64> = store.current_page_jobs().await.iter().map(|j| j.id).collect();
    assert_eq!(ids, vec![5, 6]);

    // Out-of-range pages are clamped
    assert_eq!(store.set_page(10).await, 4);
    assert_eq!(store.set_page(0).await, 1);

    assert_eq!(
        store.visible_pages().await,
        vec![
            PageMarker::Page(1),
            PageMarker::Page(2),
            PageMarker::Page(3),
            PageMarker::Page(4)
        ]
    );
}

#[tokio::test]
async fn test_filters_reset_page_and_reset_restores() {
    let stub = Arc::new(StubGateway::with_fixtures());
    let store = store_with(stub, 2);
    store.load_jobs().await;
    store.set_page(4).await;

    store
        .set_filters([FilterUpdate::select(Facet::WorkSetting, "Remote")])
        .await;
    let state = store.snapshot().await;
    assert_eq!(state.pagination.current_page, 1);
    assert_eq!(state.pagination.total_pages, 1);
    assert_eq!(state.filtered_jobs.len(), 2);

    store
        .set_filters([FilterUpdate::deselect(Facet::WorkSetting, "Remote")])
        .await;
    assert_eq!(store.read(|s| s.filtered_jobs.len()).await, 8);

    store.set_filters([FilterUpdate::Search("zzz".into())]).await;
    assert!(store.current_page_jobs().await.is_empty());
    assert_eq!(store.read(|s| s.pagination.total_pages).await, 1);

    store.reset_filters().await;
    let state = store.snapshot().await;
    assert!(state.filters.is_unrestricted());
    assert_eq!(state.filtered_jobs.len(), 8);
    assert_eq!(state.pagination.total_pages, 4);
}

#[tokio::test]
async fn test_apply_filters_after_direct_load() {
    let stub = Arc::new(StubGateway::with_fixtures());
    let store = store_with(stub, 12);
    store.load_jobs().await;
    store.apply_filters().await;

    assert_eq!(store.read(|s| s.filtered_jobs.len()).await, 8);
}

#[tokio::test]
async fn test_view_mode_and_subscription() {
    let stub = Arc::new(StubGateway::with_fixtures());
    let store = store_with(stub, 12);
    let mut rx = store.subscribe();
    assert_eq!(store.revision(), 0);

    store.set_view(ViewMode::List).await;
    assert!(rx.has_changed().unwrap());
    rx.borrow_and_update();
    assert_eq!(store.read(|s| s.view).await, ViewMode::List);

    // Loading goes through two transitions
    store.load_jobs().await;
    assert_eq!(store.revision(), 3);
    assert!(rx.has_changed().unwrap());
}

#[tokio::test]
async fn test_clones_share_state() {
    let stub = Arc::new(StubGateway::with_fixtures());
    let store = store_with(stub, 12);
    let other = store.clone();

    other.load_jobs().await;
    assert_eq!(store.read(|s| s.jobs.len()).await, 8);
}

#[tokio::test]
async fn test_fallback_serves_fixtures_when_reads_fail() {
    let stub = Arc::new(StubGateway::new(Vec::new()));
    stub.fail_reads(true);
    let store = fallback_store(stub, true);
    let token = token();

    store.load_jobs().await;
    store.load_saved_jobs(&token).await;
    store.load_applied_jobs(&token).await;
    store.load_job_by_id(2).await;

    let state = store.snapshot().await;
    assert!(state.error.is_none());
    assert_eq!(state.jobs, fixture_jobs());
    assert!(state.saved_jobs.is_empty());
    let applied: Vec<u64> = state.applied_jobs.iter().map(|j| j.id).collect();
    assert_eq!(applied, vec![4, 5]);
    assert_eq!(state.current_job.map(|j| j.id), Some(2));

    store.load_job_by_id(77).await;
    assert_eq!(
        store.read(|s| s.error.clone()).await.as_deref(),
        Some("Job not found: 77")
    );
}

#[tokio::test]
async fn test_fallback_swallows_write_failures() {
    let stub = Arc::new(StubGateway::with_fixtures());
    stub.fail_writes(true);
    let store = fallback_store(stub.clone(), true);
    let token = token();
    store.load_jobs().await;

    store.save_job(1, &token).await;
    store.apply_to_job(1, &token).await;

    let state = store.snapshot().await;
    assert!(state.error.is_none());
    assert!(state.saved_jobs.iter().any(|j| j.id == 1));
    assert!(state.applied_jobs.iter().any(|j| j.id == 1));
    assert_eq!(stub.write_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_strict_fallback_reports_write_failures() {
    let stub = Arc::new(StubGateway::with_fixtures());
    stub.fail_writes(true);
    let store = fallback_store(stub, false);
    store.load_jobs().await;

    store.apply_to_job(1, &token()).await;

    let state = store.snapshot().await;
    assert!(state.applied_jobs.is_empty());
    assert_eq!(state.error.as_deref(), Some("API error 500: write rejected"));
}
