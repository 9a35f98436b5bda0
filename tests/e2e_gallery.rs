// PhotoDex - tests/e2e_gallery.rs
//
// End-to-end tests for the index-and-serve pipeline.
//
// These tests exercise the real filesystem, the real background worker
// thread, the real store, and the real axum handlers. No mocks, no stubs.
// This covers the full path from date-named folders on disk to the JSON
// bodies a browser receives, including queries racing a live scan.

use axum::extract::{Path as UrlPath, Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::IntoResponse;
use chrono::{Days, Local};
use photodex::app::indexer::{self, IndexConfig};
use photodex::core::model::ScanStatus;
use photodex::core::store::IndexStore;
use photodex::server::{api, static_files, AppState};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

// =============================================================================
// Helpers
// =============================================================================

fn add_folder(root: &Path, name: &str, files: &[&str]) {
    let folder = root.join(name);
    fs::create_dir(&folder).expect("mkdir");
    for file in files {
        fs::write(folder.join(file), "x").expect("write");
    }
}

fn state_for(root: &Path) -> AppState {
    AppState {
        store: Arc::new(IndexStore::new()),
        root: root.to_path_buf(),
    }
}

/// Run a complete scan synchronously against `state`'s store.
fn scan(state: &AppState) {
    indexer::run(&state.root, &state.store, &IndexConfig::default());
}

/// Drive a handler response to its parsed JSON body.
async fn json_of(response: axum::response::Response) -> serde_json::Value {
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse json")
}

async fn get_status(state: &AppState) -> serde_json::Value {
    json_of(api::status(State(state.clone())).await.into_response()).await
}

async fn get_list(state: &AppState, query: &str) -> serde_json::Value {
    let uri: Uri = format!("http://localhost/api/list?{query}").parse().unwrap();
    let params = Query::try_from_uri(&uri).expect("valid query");
    json_of(api::list(State(state.clone()), params).await.into_response()).await
}

// =============================================================================
// Scan-to-query pipeline
// =============================================================================

/// Scenario A: an empty root finishes with status done and an empty index.
#[tokio::test]
async fn e2e_empty_root_reports_done_and_zero_size() {
    let dir = tempfile::tempdir().unwrap();
    let state = state_for(dir.path());
    scan(&state);

    let status = get_status(&state).await;
    assert_eq!(status["indexing"], false);
    assert_eq!(status["db_size"], 0);
    assert_eq!(status["progress"]["status"], "done");

    let list = get_list(&state, "").await;
    assert_eq!(list["data"].as_array().unwrap().len(), 0);
    assert_eq!(list["has_more"], false);
}

/// Scenarios B, C, E: records are built with descending images, keyword
/// queries narrow to matching files, and non-date folders never appear.
#[tokio::test]
async fn e2e_scan_then_keyword_query() {
    let dir = tempfile::tempdir().unwrap();
    add_folder(dir.path(), "2024-01-01", &["photo1.jpg", "photo2.png", "dog.jpg"]);
    add_folder(dir.path(), "2024-02-01", &["cat.jpg"]);
    add_folder(dir.path(), "not-a-date", &["cat.jpg"]);

    let state = state_for(dir.path());
    scan(&state);

    let status = get_status(&state).await;
    assert_eq!(status["db_size"], 2, "not-a-date is excluded");

    // Unfiltered: date-descending, images descending within each record.
    let all = get_list(&state, "").await;
    let data = all["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["date"], "2024-02-01");
    assert_eq!(data[1]["date"], "2024-01-01");
    assert_eq!(
        data[1]["images"].as_array().unwrap(),
        &["photo2.png", "photo1.jpg", "dog.jpg"]
    );

    // Keyword: the 2024-02-01 record matches by filename; the not-a-date
    // folder also holds cat.jpg but was never indexed.
    let cats = get_list(&state, "q=cat").await;
    let data = cats["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["date"], "2024-02-01");
    assert_eq!(data[0]["images"].as_array().unwrap(), &["cat.jpg"]);
}

/// Scenario D: a day-cutoff query returns only recent records, newest first.
#[tokio::test]
async fn e2e_days_cutoff_query() {
    let today = Local::now().date_naive();
    let name = |back: u64| {
        today
            .checked_sub_days(Days::new(back))
            .unwrap()
            .format("%Y-%m-%d")
            .to_string()
    };

    let dir = tempfile::tempdir().unwrap();
    add_folder(dir.path(), &name(0), &["today.jpg"]);
    add_folder(dir.path(), &name(5), &["recent.jpg"]);
    add_folder(dir.path(), &name(10), &["old.jpg"]);

    let state = state_for(dir.path());
    scan(&state);

    let recent = get_list(&state, "days=7").await;
    let data = recent["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["date"], name(0));
    assert_eq!(data[1]["date"], name(5));
}

/// Pagination over the handler: exact slices and has_more transitions.
#[tokio::test]
async fn e2e_pagination() {
    let dir = tempfile::tempdir().unwrap();
    for day in 1..=7 {
        add_folder(dir.path(), &format!("2024-03-{day:02}"), &["a.jpg"]);
    }
    let state = state_for(dir.path());
    scan(&state);

    let first = get_list(&state, "page=0&size=3").await;
    assert_eq!(first["data"].as_array().unwrap().len(), 3);
    assert_eq!(first["has_more"], true);
    assert_eq!(first["data"][0]["date"], "2024-03-07");

    let last = get_list(&state, "page=2&size=3").await;
    assert_eq!(last["data"].as_array().unwrap().len(), 1);
    assert_eq!(last["has_more"], false);

    let beyond = get_list(&state, "page=9&size=3").await;
    assert_eq!(beyond["data"].as_array().unwrap().len(), 0);
    assert_eq!(beyond["has_more"], false);
}

/// Non-numeric page/size fail typed extraction, the caller's 400.
#[test]
fn e2e_malformed_page_is_rejected_at_extraction() {
    let uri: Uri = "http://localhost/api/list?page=abc".parse().unwrap();
    assert!(Query::<api::ListQueryParams>::try_from_uri(&uri).is_err());

    let uri: Uri = "http://localhost/api/list?size=-3".parse().unwrap();
    assert!(Query::<api::ListQueryParams>::try_from_uri(&uri).is_err());
}

// =============================================================================
// Queries racing a live scan
// =============================================================================

/// Readers polling during a live scan only ever observe whole, sorted
/// snapshots, and the scan ends in a terminal state with settled counters.
#[tokio::test]
async fn e2e_queries_during_live_scan_see_sorted_snapshots() {
    let dir = tempfile::tempdir().unwrap();
    for day in 1..=28 {
        for month in 1..=6 {
            add_folder(
                dir.path(),
                &format!("2024-{month:02}-{day:02}"),
                &["shot.jpg"],
            );
        }
    }

    let state = state_for(dir.path());
    let handle = indexer::spawn(
        state.root.clone(),
        Arc::clone(&state.store),
        IndexConfig {
            progress_interval: 10,
            publish_interval: 10,
        },
    );

    let deadline = Instant::now() + Duration::from_secs(30);
    while !state.store.progress().status.is_terminal() {
        let snap = state.store.snapshot();
        for pair in snap.records().windows(2) {
            assert!(pair[0].date >= pair[1].date, "unsorted partial snapshot");
        }
        assert!(Instant::now() < deadline, "scan did not terminate");
        std::thread::yield_now();
    }

    let report = handle.join().expect("worker panicked");
    assert_eq!(report.indexed, 28 * 6);
    assert_eq!(state.store.progress().status, ScanStatus::Done);
    assert_eq!(state.store.record_count(), 28 * 6);

    let status = get_status(&state).await;
    assert_eq!(status["progress"]["scanned"], status["progress"]["total"]);
}

// =============================================================================
// Failure surface
// =============================================================================

/// A missing root marks the scan failed with a cause; the serving path
/// keeps answering with an empty index.
#[tokio::test]
async fn e2e_missing_root_fails_but_keeps_serving() {
    let state = AppState {
        store: Arc::new(IndexStore::new()),
        root: Path::new("/nonexistent/photodex-e2e-root").to_path_buf(),
    };
    scan(&state);

    let status = get_status(&state).await;
    assert_eq!(status["indexing"], false);
    assert_eq!(status["progress"]["status"], "failed");
    assert!(
        status["progress"]["error"].as_str().unwrap().contains("does not exist"),
        "cause missing: {status}"
    );

    let list = get_list(&state, "q=anything").await;
    assert_eq!(list["data"].as_array().unwrap().len(), 0);
    assert_eq!(list["has_more"], false);
}

// =============================================================================
// Static serving
// =============================================================================

#[tokio::test]
async fn e2e_image_bytes_served_with_traversal_guard() {
    let dir = tempfile::tempdir().unwrap();
    add_folder(dir.path(), "2024-01-01", &["photo.jpg"]);
    let state = state_for(dir.path());

    let ok = static_files::image(
        State(state.clone()),
        UrlPath("2024-01-01/photo.jpg".to_string()),
    )
    .await;
    assert_eq!(ok.status(), StatusCode::OK);

    let forbidden = static_files::image(
        State(state.clone()),
        UrlPath("../2024-01-01/photo.jpg".to_string()),
    )
    .await;
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    let missing = static_files::image(
        State(state),
        UrlPath("2024-01-01/other.jpg".to_string()),
    )
    .await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}
