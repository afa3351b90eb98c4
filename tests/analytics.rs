mod common;

use axum::http::StatusCode;
use common::{TestApp, body_json};
use serde_json::{Value, json};

async fn seed_entry(app: &TestApp, date: &str, content: &str, primary: &str, tags: &[&str]) {
    let mut payload = app.entry_payload(date, "Entry").await;
    payload["content"] = json!(content);
    payload["mood"]["primary_mood_id"] = json!(app.mood_id(primary).await);

    let mut tag_ids = Vec::new();
    for name in tags {
        tag_ids.push(app.tag_id(name).await);
    }
    payload["tag_ids"] = json!(tag_ids);

    app.create_entry(&payload).await;
}

async fn report(app: &TestApp, uri: &str) -> Value {
    let resp = app.get(uri).await;
    assert_eq!(resp.status(), StatusCode::OK);
    body_json(resp).await
}

fn distribution_count(report: &Value, category: &str) -> (i64, f64) {
    let point = report["mood_distribution"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["category"] == category)
        .unwrap();
    (
        point["count"].as_i64().unwrap(),
        point["percentage"].as_f64().unwrap(),
    )
}

#[tokio::test]
async fn mood_distribution_counts_primary_moods_only() {
    let app = TestApp::new().await;
    // Secondary moods must not shift the distribution.
    let mut payload = app.entry_payload("2024-03-01", "Entry").await;
    payload["mood"] = json!({
        "primary_mood_id": app.mood_id("Happy").await,
        "secondary_mood_ids": [app.mood_id("Sad").await],
    });
    app.create_entry(&payload).await;

    seed_entry(&app, "2024-03-02", "", "Grateful", &[]).await;
    seed_entry(&app, "2024-03-03", "", "Tired", &[]).await;
    seed_entry(&app, "2024-03-04", "", "Anxious", &[]).await;

    let report = report(&app, "/analytics/report?start=2024-03-01&end=2024-03-04").await;

    assert_eq!(distribution_count(&report, "positive"), (2, 50.0));
    assert_eq!(distribution_count(&report, "neutral"), (1, 25.0));
    assert_eq!(distribution_count(&report, "negative"), (1, 25.0));
}

#[tokio::test]
async fn empty_range_yields_zero_distribution_and_no_top_mood() {
    let app = TestApp::new().await;

    let report = report(&app, "/analytics/report?start=2024-03-01&end=2024-03-03").await;

    for category in ["positive", "neutral", "negative"] {
        assert_eq!(distribution_count(&report, category), (0, 0.0));
    }
    assert_eq!(report["most_frequent_mood"], Value::Null);
    assert_eq!(report["top_tags"], json!([]));
    assert_eq!(report["category_breakdown"], json!([]));
}

#[tokio::test]
async fn most_frequent_mood_tie_breaks_on_name() {
    let app = TestApp::new().await;
    seed_entry(&app, "2024-03-01", "", "Happy", &[]).await;
    seed_entry(&app, "2024-03-02", "", "Happy", &[]).await;
    seed_entry(&app, "2024-03-03", "", "Calm", &[]).await;
    seed_entry(&app, "2024-03-04", "", "Calm", &[]).await;

    let report = report(&app, "/analytics/report?start=2024-03-01&end=2024-03-04").await;

    // Calm and Happy both have 2; Calm wins alphabetically.
    assert_eq!(report["most_frequent_mood"]["name"], "Calm");
    assert_eq!(report["most_frequent_mood"]["count"], 2);
}

#[tokio::test]
async fn top_tags_order_by_count_then_name() {
    let app = TestApp::new().await;
    seed_entry(&app, "2024-03-01", "", "Okay", &["routine", "goal"]).await;
    seed_entry(&app, "2024-03-02", "", "Okay", &["routine", "insight"]).await;
    seed_entry(&app, "2024-03-03", "", "Okay", &["routine"]).await;

    let report = report(&app, "/analytics/report?start=2024-03-01&end=2024-03-03").await;

    let names: Vec<&str> = report["top_tags"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Routine", "Goal", "Insight"]);
    assert_eq!(report["top_tags"][0]["count"], 3);
}

#[tokio::test]
async fn top_tags_respects_limit() {
    let app = TestApp::new().await;
    seed_entry(&app, "2024-03-01", "", "Okay", &["routine", "goal", "insight"]).await;

    let report = report(&app, "/analytics/report?start=2024-03-01&end=2024-03-01&top_tags=2").await;
    assert_eq!(report["top_tags"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn category_breakdown_orders_by_count_then_name() {
    let app = TestApp::new().await;

    for (date, category) in [
        ("2024-03-01", "Work"),
        ("2024-03-02", "Work"),
        ("2024-03-03", "Health"),
        ("2024-03-04", "Travel"),
    ] {
        let mut payload = app.entry_payload(date, "Entry").await;
        payload["category_id"] = json!(app.category_id(category).await);
        app.create_entry(&payload).await;
    }

    let report = report(&app, "/analytics/report?start=2024-03-01&end=2024-03-04").await;

    let names: Vec<&str> = report["category_breakdown"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Work", "Health", "Travel"]);
}

#[tokio::test]
async fn word_trend_has_one_point_per_day_including_zero_days() {
    let app = TestApp::new().await;
    seed_entry(&app, "2024-03-01", "one two three", "Okay", &[]).await;
    seed_entry(&app, "2024-03-05", "", "Okay", &[]).await;

    let report = report(&app, "/analytics/report?start=2024-03-01&end=2024-03-05").await;

    let counts: Vec<i64> = report["word_count_trend"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["word_count"].as_i64().unwrap())
        .collect();
    assert_eq!(counts, vec![3, 0, 0, 0, 0]);
    assert_eq!(report["word_count_trend"][0]["date"], "2024-03-01");
    assert_eq!(report["word_count_trend"][4]["date"], "2024-03-05");
}

#[tokio::test]
async fn reversed_range_is_swapped() {
    let app = TestApp::new().await;
    seed_entry(&app, "2024-03-02", "", "Okay", &[]).await;

    let report = report(&app, "/analytics/report?start=2024-03-04&end=2024-03-01").await;
    assert_eq!(report["range_start"], "2024-03-01");
    assert_eq!(report["range_end"], "2024-03-04");
}

#[tokio::test]
async fn missing_start_defaults_to_earliest_entry() {
    let app = TestApp::new().await;
    seed_entry(&app, "2024-03-03", "", "Okay", &[]).await;
    seed_entry(&app, "2024-03-06", "", "Okay", &[]).await;

    let report = report(&app, "/analytics/report?end=2024-03-06").await;
    assert_eq!(report["range_start"], "2024-03-03");
    assert_eq!(report["range_end"], "2024-03-06");
}
