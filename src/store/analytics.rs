use std::collections::HashMap;

use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::MoodCategory;
use crate::models::analytics::{CategoryBreakdownItem, MoodFrequency, TagUsage};

/// Raw aggregates over the inclusive date range; post-processing lives in
/// the analytics engine.
pub async fn primary_mood_category_counts(
    db: &SqlitePool,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<HashMap<MoodCategory, i64>, AppError> {
    let rows: Vec<(MoodCategory, i64)> = sqlx::query_as(
        r#"
        SELECT m.category, COUNT(*)
        FROM entries e
        JOIN entry_moods em ON em.entry_id = e.id AND em.role = 'primary'
        JOIN moods m ON m.id = em.mood_id
        WHERE e.entry_date >= ? AND e.entry_date <= ?
        GROUP BY m.category
        "#,
    )
    .bind(start)
    .bind(end)
    .fetch_all(db)
    .await
    .map_err(|e| AppError::data_access("failed to load mood distribution", e))?;

    Ok(rows.into_iter().collect())
}

pub async fn most_frequent_primary_mood(
    db: &SqlitePool,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Option<MoodFrequency>, AppError> {
    sqlx::query_as(
        r#"
        SELECT m.id AS mood_id, m.name AS name, m.category AS category, COUNT(*) AS count
        FROM entries e
        JOIN entry_moods em ON em.entry_id = e.id AND em.role = 'primary'
        JOIN moods m ON m.id = em.mood_id
        WHERE e.entry_date >= ? AND e.entry_date <= ?
        GROUP BY m.id, m.name, m.category
        ORDER BY count DESC, m.name ASC
        LIMIT 1
        "#,
    )
    .bind(start)
    .bind(end)
    .fetch_optional(db)
    .await
    .map_err(|e| AppError::data_access("failed to load most frequent mood", e))
}

pub async fn top_tags(
    db: &SqlitePool,
    start: NaiveDate,
    end: NaiveDate,
    limit: i64,
) -> Result<Vec<TagUsage>, AppError> {
    let limit = if limit <= 0 { 10 } else { limit };

    sqlx::query_as(
        r#"
        SELECT t.id AS tag_id, t.name AS name, COUNT(*) AS count
        FROM entries e
        JOIN entry_tags et ON et.entry_id = e.id
        JOIN tags t ON t.id = et.tag_id
        WHERE e.entry_date >= ? AND e.entry_date <= ?
        GROUP BY t.id, t.name
        ORDER BY count DESC, t.name ASC
        LIMIT ?
        "#,
    )
    .bind(start)
    .bind(end)
    .bind(limit)
    .fetch_all(db)
    .await
    .map_err(|e| AppError::data_access("failed to load top tags", e))
}

pub async fn category_breakdown(
    db: &SqlitePool,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<CategoryBreakdownItem>, AppError> {
    sqlx::query_as(
        r#"
        SELECT c.id AS category_id, c.name AS name, COUNT(*) AS count
        FROM entries e
        JOIN categories c ON c.id = e.category_id
        WHERE e.entry_date >= ? AND e.entry_date <= ?
        GROUP BY c.id, c.name
        ORDER BY count DESC, c.name ASC
        "#,
    )
    .bind(start)
    .bind(end)
    .fetch_all(db)
    .await
    .map_err(|e| AppError::data_access("failed to load category breakdown", e))
}

/// Date and content of every entry in range, for the word-count trend.
pub async fn entry_contents_in_range(
    db: &SqlitePool,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<(NaiveDate, String)>, AppError> {
    sqlx::query_as("SELECT entry_date, content FROM entries WHERE entry_date >= ? AND entry_date <= ?")
        .bind(start)
        .bind(end)
        .fetch_all(db)
        .await
        .map_err(|e| AppError::data_access("failed to load content for word trend", e))
}
