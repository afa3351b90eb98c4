use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::AppState;
use crate::error::AppError;
use crate::journal;
use crate::models::MoodSelection;
use crate::store::search::SearchQuery;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/entries", post(create_entry).get(list_entries))
        .route(
            "/entries/{id}",
            get(get_entry).put(update_entry).delete(delete_entry),
        )
        .route("/entries/by-date/{date}", get(get_entry_by_date))
}

#[derive(Deserialize)]
pub struct EntryPayload {
    pub entry_date: Option<NaiveDate>,
    pub category_id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub mood: MoodSelection,
    #[serde(default)]
    pub tag_ids: Vec<String>,
}

#[derive(Deserialize)]
pub struct ListParams {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    category_id: Option<String>,
    q: Option<String>,
    mood_ids: Option<String>,
    tag_ids: Option<String>,
    offset: Option<i64>,
    limit: Option<i64>,
}

/// Comma-separated id list query param, blanks dropped.
fn split_ids(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(|part| part.trim().to_string())
            .filter(|part| !part.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

async fn create_entry(
    State(state): State<AppState>,
    Json(payload): Json<EntryPayload>,
) -> Result<impl IntoResponse, AppError> {
    let entry_date = payload
        .entry_date
        .ok_or_else(|| AppError::validation("entry date is required"))?;

    let entry = journal::create(
        &state.db,
        entry_date,
        &payload.category_id,
        &payload.mood,
        &payload.tag_ids,
        &payload.title,
        &payload.content,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

async fn list_entries(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let query = SearchQuery {
        start_date: params.start,
        end_date: params.end,
        category_id: params.category_id,
        text: params.q,
        mood_ids: split_ids(params.mood_ids.as_deref()),
        tag_ids: split_ids(params.tag_ids.as_deref()),
    };

    let items = journal::search_list_page(
        &state.db,
        &query,
        params.offset.unwrap_or(0),
        params.limit.unwrap_or(0),
    )
    .await?;

    Ok(Json(items))
}

async fn get_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let detail = journal::get_detail(&state.db, &id).await?;
    Ok(Json(detail))
}

async fn get_entry_by_date(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> Result<impl IntoResponse, AppError> {
    let detail = journal::get_detail_by_date(&state.db, date).await?;
    Ok(Json(detail))
}

async fn update_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<EntryPayload>,
) -> Result<impl IntoResponse, AppError> {
    let entry = journal::update(
        &state.db,
        &id,
        &payload.category_id,
        &payload.mood,
        &payload.tag_ids,
        &payload.title,
        &payload.content,
    )
    .await?;

    Ok(Json(entry))
}

async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    journal::delete(&state.db, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
