use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

pub struct TestApp {
    pub router: Router,
    pub db: SqlitePool,
}

impl TestApp {
    pub async fn new() -> Self {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .expect("Failed to create in-memory SQLite pool");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        let router = daybook::build_app(pool.clone());

        Self { router, db: pool }
    }

    /// Send a request through the app and return the response.
    pub async fn request(&self, req: Request<Body>) -> Response {
        tower::ServiceExt::oneshot(self.router.clone(), req)
            .await
            .unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.request(req).await
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> Response {
        let req = Request::builder()
            .uri(uri)
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.request(req).await
    }

    pub async fn put_json(&self, uri: &str, body: &Value) -> Response {
        let req = Request::builder()
            .uri(uri)
            .method("PUT")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.request(req).await
    }

    pub async fn delete(&self, uri: &str) -> Response {
        let req = Request::builder()
            .uri(uri)
            .method("DELETE")
            .body(Body::empty())
            .unwrap();
        self.request(req).await
    }

    /// Look up a seeded mood id by name.
    pub async fn mood_id(&self, name: &str) -> String {
        let row: (String,) = sqlx::query_as("SELECT id FROM moods WHERE name = ?")
            .bind(name)
            .fetch_one(&self.db)
            .await
            .expect("Mood should be seeded");
        row.0
    }

    /// Look up a seeded category id by name.
    pub async fn category_id(&self, name: &str) -> String {
        let row: (String,) = sqlx::query_as("SELECT id FROM categories WHERE name = ?")
            .bind(name)
            .fetch_one(&self.db)
            .await
            .expect("Category should be seeded");
        row.0
    }

    /// Look up a tag id by normalized name.
    pub async fn tag_id(&self, normalized: &str) -> String {
        let row: (String,) = sqlx::query_as("SELECT id FROM tags WHERE normalized_name = ?")
            .bind(normalized)
            .fetch_one(&self.db)
            .await
            .expect("Tag should exist");
        row.0
    }

    /// Minimal valid create payload: Reflection category, primary mood Okay.
    pub async fn entry_payload(&self, date: &str, title: &str) -> Value {
        json!({
            "entry_date": date,
            "category_id": self.category_id("Reflection").await,
            "title": title,
            "content": "",
            "mood": { "primary_mood_id": self.mood_id("Okay").await },
            "tag_ids": [],
        })
    }

    /// Create an entry through the API and return the response body.
    pub async fn create_entry(&self, payload: &Value) -> Value {
        let resp = self.post_json("/entries", payload).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        body_json(resp).await
    }
}

/// Read the full response body as JSON.
pub async fn body_json(resp: Response) -> Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
