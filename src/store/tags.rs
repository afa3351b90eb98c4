use std::collections::HashMap;

use sqlx::SqlitePool;

use crate::error::{AppError, is_unique_violation};
use crate::models::Tag;
use crate::models::tag::normalize_tag_name;

pub async fn list_all(db: &SqlitePool) -> Result<Vec<Tag>, AppError> {
    sqlx::query_as("SELECT * FROM tags ORDER BY name")
        .fetch_all(db)
        .await
        .map_err(|e| AppError::data_access("failed to load tags", e))
}

pub async fn get_by_normalized_name(
    db: &SqlitePool,
    normalized: &str,
) -> Result<Option<Tag>, AppError> {
    sqlx::query_as("SELECT * FROM tags WHERE normalized_name = ?")
        .bind(normalized)
        .fetch_optional(db)
        .await
        .map_err(|e| AppError::data_access("failed to load tag by name", e))
}

pub async fn get_by_ids(db: &SqlitePool, ids: &[String]) -> Result<Vec<Tag>, AppError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders = vec!["?"; ids.len()].join(", ");
    let sql = format!("SELECT * FROM tags WHERE id IN ({placeholders})");

    let mut query = sqlx::query_as::<_, Tag>(&sql);
    for id in ids {
        query = query.bind(id);
    }

    query
        .fetch_all(db)
        .await
        .map_err(|e| AppError::data_access("failed to load tags by ids", e))
}

pub async fn names_by_id(
    db: &SqlitePool,
    ids: &[String],
) -> Result<HashMap<String, String>, AppError> {
    let tags = get_by_ids(db, ids).await?;
    Ok(tags.into_iter().map(|t| (t.id, t.name)).collect())
}

/// Find a tag by its normalized name, creating it when absent.
///
/// Creation is optimistic: a uniqueness violation on insert means another
/// writer created the same normalized name concurrently, so the now-existing
/// row is fetched and returned instead of failing.
pub async fn get_or_create(db: &SqlitePool, name: &str) -> Result<Tag, AppError> {
    let mut name = name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::validation("tag name is required"));
    }
    if name.chars().count() > 100 {
        name = name.chars().take(100).collect();
    }

    let normalized = normalize_tag_name(&name);
    if let Some(existing) = get_by_normalized_name(db, &normalized).await? {
        return Ok(existing);
    }

    let tag = Tag::new(name);
    let inserted = sqlx::query(
        r#"
        INSERT INTO tags (id, name, normalized_name, is_predefined, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&tag.id)
    .bind(&tag.name)
    .bind(&tag.normalized_name)
    .bind(tag.is_predefined)
    .bind(tag.created_at)
    .bind(tag.updated_at)
    .execute(db)
    .await;

    match inserted {
        Ok(_) => Ok(tag),
        Err(e) if is_unique_violation(&e) => get_by_normalized_name(db, &normalized)
            .await?
            .ok_or_else(|| AppError::data_access("failed to create tag", e)),
        Err(e) => Err(AppError::data_access("failed to create tag", e)),
    }
}

/// Atomically replace the tag links for an entry. Duplicate and empty ids
/// are dropped before insertion.
pub async fn replace_tags(
    db: &SqlitePool,
    entry_id: &str,
    tag_ids: &[String],
) -> Result<(), AppError> {
    let mut ids: Vec<&str> = Vec::new();
    for id in tag_ids {
        if !id.is_empty() && !ids.contains(&id.as_str()) {
            ids.push(id);
        }
    }

    let mut tx = db
        .begin()
        .await
        .map_err(|e| AppError::data_access("failed to save journal entry tags", e))?;

    sqlx::query("DELETE FROM entry_tags WHERE entry_id = ?")
        .bind(entry_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::data_access("failed to save journal entry tags", e))?;

    for tag_id in ids {
        sqlx::query("INSERT INTO entry_tags (entry_id, tag_id) VALUES (?, ?)")
            .bind(entry_id)
            .bind(tag_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::data_access("failed to save journal entry tags", e))?;
    }

    tx.commit()
        .await
        .map_err(|e| AppError::data_access("failed to save journal entry tags", e))
}

pub async fn get_tag_ids(db: &SqlitePool, entry_id: &str) -> Result<Vec<String>, AppError> {
    let rows: Vec<(String,)> = sqlx::query_as("SELECT tag_id FROM entry_tags WHERE entry_id = ?")
        .bind(entry_id)
        .fetch_all(db)
        .await
        .map_err(|e| AppError::data_access("failed to load journal entry tags", e))?;

    Ok(rows.into_iter().map(|(id,)| id).collect())
}

/// Map from entry id to its distinct tag ids, omitting entries with none.
pub async fn tag_ids_by_entry(
    db: &SqlitePool,
    entry_ids: &[String],
) -> Result<HashMap<String, Vec<String>>, AppError> {
    if entry_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let placeholders = vec!["?"; entry_ids.len()].join(", ");
    let sql = format!("SELECT entry_id, tag_id FROM entry_tags WHERE entry_id IN ({placeholders})");

    let mut query = sqlx::query_as::<_, (String, String)>(&sql);
    for id in entry_ids {
        query = query.bind(id);
    }

    let rows = query
        .fetch_all(db)
        .await
        .map_err(|e| AppError::data_access("failed to load tags for entries", e))?;

    let mut map: HashMap<String, Vec<String>> = HashMap::new();
    for (entry_id, tag_id) in rows {
        map.entry(entry_id).or_default().push(tag_id);
    }

    Ok(map)
}
