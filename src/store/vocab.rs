use std::collections::HashMap;

use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::{Category, Mood};

// Moods and categories are seeded reference data: both expose the same
// list-all / exists surface, and neither grows at runtime (tags do, over in
// store::tags).

pub async fn list_moods(db: &SqlitePool) -> Result<Vec<Mood>, AppError> {
    sqlx::query_as("SELECT * FROM moods ORDER BY name")
        .fetch_all(db)
        .await
        .map_err(|e| AppError::data_access("failed to load moods", e))
}

pub async fn mood_exists(db: &SqlitePool, id: &str) -> Result<bool, AppError> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM moods WHERE id = ?")
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(|e| AppError::data_access("failed to look up mood", e))?;

    Ok(row.0 > 0)
}

pub async fn mood_names(db: &SqlitePool) -> Result<HashMap<String, String>, AppError> {
    let moods = list_moods(db).await?;
    Ok(moods.into_iter().map(|m| (m.id, m.name)).collect())
}

pub async fn list_categories(db: &SqlitePool) -> Result<Vec<Category>, AppError> {
    sqlx::query_as("SELECT * FROM categories ORDER BY name")
        .fetch_all(db)
        .await
        .map_err(|e| AppError::data_access("failed to load categories", e))
}

pub async fn category_exists(db: &SqlitePool, id: &str) -> Result<bool, AppError> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM categories WHERE id = ?")
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(|e| AppError::data_access("failed to look up category", e))?;

    Ok(row.0 > 0)
}

pub async fn category_names_by_id(
    db: &SqlitePool,
    ids: &[String],
) -> Result<HashMap<String, String>, AppError> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let placeholders = vec!["?"; ids.len()].join(", ");
    let sql = format!("SELECT id, name FROM categories WHERE id IN ({placeholders})");

    let mut query = sqlx::query_as::<_, (String, String)>(&sql);
    for id in ids {
        query = query.bind(id);
    }

    let rows = query
        .fetch_all(db)
        .await
        .map_err(|e| AppError::data_access("failed to load categories by ids", e))?;

    Ok(rows.into_iter().collect())
}
