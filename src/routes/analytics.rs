use axum::{
    Json, Router,
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::AppState;
use crate::error::AppError;
use crate::{analytics, streak};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/analytics/report", get(report))
        .route("/analytics/streak", get(streak_report))
}

#[derive(Deserialize)]
pub struct RangeParams {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    top_tags: Option<i64>,
}

async fn report(
    State(state): State<AppState>,
    Query(params): Query<RangeParams>,
) -> Result<impl IntoResponse, AppError> {
    let report = analytics::get_report(
        &state.db,
        params.start,
        params.end,
        params.top_tags.unwrap_or(10),
    )
    .await?;

    Ok(Json(report))
}

async fn streak_report(
    State(state): State<AppState>,
    Query(params): Query<RangeParams>,
) -> Result<impl IntoResponse, AppError> {
    let report = streak::calculate_for_range(&state.db, params.start, params.end).await?;
    Ok(Json(report))
}
