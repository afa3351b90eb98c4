use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::error::{AppError, is_unique_violation};
use crate::models::JournalEntry;

/// Durable CRUD and point/range lookup for journal entries, keyed by a
/// unique calendar date. Reads return `None`/empty when nothing matches.
pub async fn get_by_id(db: &SqlitePool, id: &str) -> Result<Option<JournalEntry>, AppError> {
    sqlx::query_as("SELECT * FROM entries WHERE id = ?")
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(|e| AppError::data_access("failed to load journal entry", e))
}

pub async fn get_by_date(
    db: &SqlitePool,
    entry_date: NaiveDate,
) -> Result<Option<JournalEntry>, AppError> {
    sqlx::query_as("SELECT * FROM entries WHERE entry_date = ?")
        .bind(entry_date)
        .fetch_optional(db)
        .await
        .map_err(|e| AppError::data_access("failed to load journal entry by date", e))
}

pub async fn get_all(db: &SqlitePool) -> Result<Vec<JournalEntry>, AppError> {
    sqlx::query_as("SELECT * FROM entries ORDER BY entry_date DESC")
        .fetch_all(db)
        .await
        .map_err(|e| AppError::data_access("failed to load journal entries", e))
}

pub async fn get_in_range(
    db: &SqlitePool,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<JournalEntry>, AppError> {
    sqlx::query_as(
        "SELECT * FROM entries WHERE entry_date >= ? AND entry_date <= ? ORDER BY entry_date DESC",
    )
    .bind(start)
    .bind(end)
    .fetch_all(db)
    .await
    .map_err(|e| AppError::data_access("failed to load entries in range", e))
}

/// Distinct entry dates within the inclusive range, for streaks and the
/// calendar view.
pub async fn get_dates_in_range(
    db: &SqlitePool,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<NaiveDate>, AppError> {
    let rows: Vec<(NaiveDate,)> = sqlx::query_as(
        "SELECT DISTINCT entry_date FROM entries WHERE entry_date >= ? AND entry_date <= ?",
    )
    .bind(start)
    .bind(end)
    .fetch_all(db)
    .await
    .map_err(|e| AppError::data_access("failed to load entry dates", e))?;

    Ok(rows.into_iter().map(|(d,)| d).collect())
}

pub async fn min_max_dates(
    db: &SqlitePool,
) -> Result<(Option<NaiveDate>, Option<NaiveDate>), AppError> {
    let row: (Option<NaiveDate>, Option<NaiveDate>) =
        sqlx::query_as("SELECT MIN(entry_date), MAX(entry_date) FROM entries")
            .fetch_one(db)
            .await
            .map_err(|e| AppError::data_access("failed to load min/max entry dates", e))?;

    Ok(row)
}

/// Insert a new entry. A second entry on the same date is a conflict.
pub async fn insert(db: &SqlitePool, entry: &JournalEntry) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO entries (id, entry_date, category_id, title, content, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&entry.id)
    .bind(entry.entry_date)
    .bind(&entry.category_id)
    .bind(&entry.title)
    .bind(&entry.content)
    .bind(entry.created_at)
    .bind(entry.updated_at)
    .execute(db)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            AppError::conflict(format!(
                "an entry for {} already exists",
                entry.entry_date.format("%Y-%m-%d")
            ))
        } else {
            AppError::data_access("failed to add journal entry", e)
        }
    })?;

    Ok(())
}

pub async fn update(db: &SqlitePool, entry: &JournalEntry) -> Result<(), AppError> {
    sqlx::query(
        r#"
        UPDATE entries
        SET category_id = ?, title = ?, content = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&entry.category_id)
    .bind(&entry.title)
    .bind(&entry.content)
    .bind(entry.updated_at)
    .bind(&entry.id)
    .execute(db)
    .await
    .map_err(|e| AppError::data_access("failed to update journal entry", e))?;

    Ok(())
}

pub async fn delete(db: &SqlitePool, id: &str) -> Result<(), AppError> {
    sqlx::query("DELETE FROM entries WHERE id = ?")
        .bind(id)
        .execute(db)
        .await
        .map_err(|e| AppError::data_access("failed to delete journal entry", e))?;

    Ok(())
}
