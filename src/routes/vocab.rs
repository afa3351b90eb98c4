use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;

use crate::AppState;
use crate::error::AppError;
use crate::store::{tags, vocab};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/moods", get(list_moods))
        .route("/categories", get(list_categories))
        .route("/tags", get(list_tags).post(create_tag))
}

async fn list_moods(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(Json(vocab::list_moods(&state.db).await?))
}

async fn list_categories(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(Json(vocab::list_categories(&state.db).await?))
}

async fn list_tags(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(Json(tags::list_all(&state.db).await?))
}

#[derive(Deserialize)]
pub struct TagPayload {
    name: String,
}

/// Get-or-create by normalized name: posting an existing name (any casing
/// or padding) returns the existing tag.
async fn create_tag(
    State(state): State<AppState>,
    Json(payload): Json<TagPayload>,
) -> Result<impl IntoResponse, AppError> {
    let tag = tags::get_or_create(&state.db, &payload.name).await?;
    Ok((StatusCode::CREATED, Json(tag)))
}
