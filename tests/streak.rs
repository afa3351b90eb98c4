mod common;

use axum::http::StatusCode;
use common::{TestApp, body_json};
use serde_json::{Value, json};

async fn seed_entry(app: &TestApp, date: &str) {
    let payload = app.entry_payload(date, "Entry").await;
    app.create_entry(&payload).await;
}

async fn streak(app: &TestApp, uri: &str) -> Value {
    let resp = app.get(uri).await;
    assert_eq!(resp.status(), StatusCode::OK);
    body_json(resp).await
}

#[tokio::test]
async fn gap_day_resets_streak_and_is_reported_missed() {
    let app = TestApp::new().await;
    seed_entry(&app, "2024-03-01").await;
    seed_entry(&app, "2024-03-03").await;

    let report = streak(&app, "/analytics/streak?start=2024-03-01&end=2024-03-03").await;

    assert_eq!(report["longest_streak"], 1);
    assert_eq!(report["current_streak"], 1);
    assert_eq!(report["missed_days"], json!(["2024-03-02"]));
}

#[tokio::test]
async fn current_streak_is_zero_when_range_end_has_no_entry() {
    let app = TestApp::new().await;
    seed_entry(&app, "2024-03-01").await;
    seed_entry(&app, "2024-03-02").await;

    let report = streak(&app, "/analytics/streak?start=2024-03-01&end=2024-03-04").await;

    assert_eq!(report["longest_streak"], 2);
    assert_eq!(report["current_streak"], 0);
    assert_eq!(report["missed_days"], json!(["2024-03-03", "2024-03-04"]));
}

#[tokio::test]
async fn consecutive_days_count_backward_from_range_end() {
    let app = TestApp::new().await;
    seed_entry(&app, "2024-03-02").await;
    seed_entry(&app, "2024-03-03").await;
    seed_entry(&app, "2024-03-04").await;

    let report = streak(&app, "/analytics/streak?start=2024-03-01&end=2024-03-04").await;

    assert_eq!(report["current_streak"], 3);
    assert_eq!(report["longest_streak"], 3);
    assert_eq!(report["missed_days"], json!(["2024-03-01"]));
}

#[tokio::test]
async fn missing_start_defaults_to_earliest_entry() {
    let app = TestApp::new().await;
    seed_entry(&app, "2024-03-02").await;
    seed_entry(&app, "2024-03-03").await;

    let report = streak(&app, "/analytics/streak?end=2024-03-03").await;

    assert_eq!(report["range_start"], "2024-03-02");
    assert_eq!(report["current_streak"], 2);
    assert_eq!(report["missed_days"], json!([]));
}
