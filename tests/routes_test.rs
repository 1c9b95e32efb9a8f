//! HTTP tests for the read-only API.
//!
//! Run with: cargo test --test routes_test

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::ServiceExt;
use vantage_sync::common::{AppState, SyncStatus};
use vantage_sync::routes::build_router;
use vantage_sync::station::parser::parse_live;
use vantage_sync::station::ArchiveRecord;
use vantage_sync::store::{MemoryStore, WeatherStore};

fn state_with(store: Arc<MemoryStore>) -> AppState {
    let status = Arc::new(RwLock::new(SyncStatus {
        archive_period_minutes: Some(5),
        ..SyncStatus::default()
    }));
    AppState::new(store, status)
}

async fn get(state: AppState, uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
    let response = build_router(state)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let body = response.into_body().collect().await.unwrap().to_bytes().to_vec();
    (status, content_type, body)
}

async fn seeded_archive() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    let records: Vec<ArchiveRecord> = (0..3)
        .map(|i| ArchiveRecord {
            temperature: Some(15.0 + f64::from(i)),
            ..ArchiveRecord::empty(Utc.with_ymd_and_hms(2026, 10, 19, 10, 5 * i, 0).unwrap())
        })
        .collect();
    store.upsert_archive(&records).await.unwrap();
    store
}

#[tokio::test]
async fn healthz_returns_ok() {
    let state = state_with(Arc::new(MemoryStore::new()));
    let (status, _, _) = get(state, "/healthz").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn live_is_404_until_stored() {
    let store = Arc::new(MemoryStore::new());
    let state = state_with(Arc::clone(&store));

    let (status, _, _) = get(state.clone(), "/api/live").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let polled_at = Utc.with_ymd_and_hms(2026, 10, 19, 10, 7, 0).unwrap();
    store
        .upsert_live(&parse_live("Bar = 29.92\nIsRainingNow = yes\n", polled_at))
        .await
        .unwrap();

    let (status, _, body) = get(state, "/api/live").await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["barometer"], 1013.0);
    assert_eq!(json["is_raining"], true);
}

#[tokio::test]
async fn archive_json_respects_window_and_limit() {
    let state = state_with(seeded_archive().await);

    let (status, _, body) = get(state.clone(), "/api/archive").await;
    assert_eq!(status, StatusCode::OK);
    let json: Vec<serde_json::Value> = serde_json::from_slice(&body).unwrap();
    assert_eq!(json.len(), 3);

    let (_, _, body) = get(
        state,
        "/api/archive?start=2026-10-19T10:05:00Z&limit=1",
    )
    .await;
    let json: Vec<serde_json::Value> = serde_json::from_slice(&body).unwrap();
    assert_eq!(json.len(), 1);
    assert_eq!(json[0]["temperature"], 16.0);
}

#[tokio::test]
async fn archive_csv_has_header_and_rows() {
    let state = state_with(seeded_archive().await);

    let (status, content_type, body) = get(state, "/api/archive?format=csv").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("text/csv"));

    let text = String::from_utf8(body).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("time,"));
}

#[tokio::test]
async fn archive_rejects_bad_parameters() {
    let state = state_with(seeded_archive().await);

    let (status, _, _) = get(
        state.clone(),
        "/api/archive?start=2026-10-19T11:00:00Z&end=2026-10-19T10:00:00Z",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = get(state.clone(), "/api/archive?limit=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = get(state, "/api/archive?format=xml").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn sync_status_is_served() {
    let state = state_with(Arc::new(MemoryStore::new()));

    let (status, _, body) = get(state, "/api/sync").await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["phase"], "idle");
    assert_eq!(json["archive_period_minutes"], 5);
    assert_eq!(json["skipped_ticks"], 0);
}

#[tokio::test]
async fn schema_describes_both_collections() {
    let state = state_with(Arc::new(MemoryStore::new()));

    let (status, _, body) = get(state, "/api/schema").await;
    assert_eq!(status, StatusCode::OK);
    let json: Vec<serde_json::Value> = serde_json::from_slice(&body).unwrap();
    assert_eq!(json.len(), 2);
    assert_eq!(json[0]["label"], "Live Weather");
    assert_eq!(json[1]["label"], "Weather Records");

    let barometer = json[0]["fields"]
        .as_array()
        .unwrap()
        .iter()
        .find(|f| f["name"] == "barometer")
        .unwrap();
    assert_eq!(barometer["suffix"], "mb");
    assert_eq!(barometer["type"], "number");
}
