use std::collections::HashMap;

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{MoodRole, MoodSelection};

#[derive(sqlx::FromRow)]
struct MoodLinkRow {
    mood_id: String,
    role: MoodRole,
    position: i64,
}

/// Atomically replace the mood links for an entry: delete everything, insert
/// the primary, then up to two distinct secondaries at positions 1 and 2 in
/// list order. Readers never observe a partial selection.
pub async fn replace_selection(
    db: &SqlitePool,
    entry_id: &str,
    selection: &MoodSelection,
) -> Result<(), AppError> {
    let mut secondaries: Vec<&str> = Vec::new();
    for id in &selection.secondary_mood_ids {
        if !id.is_empty() && !secondaries.contains(&id.as_str()) {
            secondaries.push(id);
        }
    }
    secondaries.truncate(2);

    let mut tx = db
        .begin()
        .await
        .map_err(|e| AppError::data_access("failed to save mood selection", e))?;

    sqlx::query("DELETE FROM entry_moods WHERE entry_id = ?")
        .bind(entry_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::data_access("failed to save mood selection", e))?;

    sqlx::query(
        "INSERT INTO entry_moods (id, entry_id, mood_id, role, position) VALUES (?, ?, ?, ?, 0)",
    )
    .bind(Uuid::new_v4().to_string())
    .bind(entry_id)
    .bind(&selection.primary_mood_id)
    .bind(MoodRole::Primary)
    .execute(&mut *tx)
    .await
    .map_err(|e| AppError::data_access("failed to save mood selection", e))?;

    for (i, mood_id) in secondaries.iter().enumerate() {
        sqlx::query(
            "INSERT INTO entry_moods (id, entry_id, mood_id, role, position) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(entry_id)
        .bind(mood_id)
        .bind(MoodRole::Secondary)
        .bind(i as i64 + 1)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::data_access("failed to save mood selection", e))?;
    }

    tx.commit()
        .await
        .map_err(|e| AppError::data_access("failed to save mood selection", e))
}

/// Reconstruct the selection for one entry: primary plus secondaries ordered
/// by stored position, truncated to 2. `None` when the entry has no links.
pub async fn get_selection(
    db: &SqlitePool,
    entry_id: &str,
) -> Result<Option<MoodSelection>, AppError> {
    let rows: Vec<MoodLinkRow> = sqlx::query_as(
        "SELECT mood_id, role, position FROM entry_moods WHERE entry_id = ? ORDER BY position",
    )
    .bind(entry_id)
    .fetch_all(db)
    .await
    .map_err(|e| AppError::data_access("failed to load mood selection", e))?;

    Ok(build_selection(rows))
}

fn build_selection(rows: Vec<MoodLinkRow>) -> Option<MoodSelection> {
    let primary = rows
        .iter()
        .find(|r| r.role == MoodRole::Primary)
        .map(|r| r.mood_id.clone())?;

    let mut secondaries: Vec<(i64, String)> = rows
        .into_iter()
        .filter(|r| r.role == MoodRole::Secondary)
        .map(|r| (r.position, r.mood_id))
        .collect();
    secondaries.sort_by_key(|(pos, _)| *pos);

    Some(MoodSelection {
        primary_mood_id: primary,
        secondary_mood_ids: secondaries.into_iter().map(|(_, id)| id).take(2).collect(),
    })
}

/// Map from entry id to its primary mood id, omitting entries with no
/// stored selection.
pub async fn primary_mood_ids_by_entry(
    db: &SqlitePool,
    entry_ids: &[String],
) -> Result<HashMap<String, String>, AppError> {
    if entry_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let placeholders = vec!["?"; entry_ids.len()].join(", ");
    let sql = format!(
        "SELECT entry_id, mood_id FROM entry_moods WHERE role = 'primary' AND entry_id IN ({placeholders})"
    );

    let mut query = sqlx::query_as::<_, (String, String)>(&sql);
    for id in entry_ids {
        query = query.bind(id);
    }

    let rows = query
        .fetch_all(db)
        .await
        .map_err(|e| AppError::data_access("failed to load primary moods for entries", e))?;

    Ok(rows.into_iter().collect())
}

/// Map from entry id to its full mood selection, omitting entries without
/// one.
pub async fn selections_by_entry(
    db: &SqlitePool,
    entry_ids: &[String],
) -> Result<HashMap<String, MoodSelection>, AppError> {
    if entry_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let placeholders = vec!["?"; entry_ids.len()].join(", ");
    let sql = format!(
        "SELECT entry_id, mood_id, role, position FROM entry_moods WHERE entry_id IN ({placeholders}) ORDER BY position"
    );

    let mut query = sqlx::query_as::<_, (String, String, MoodRole, i64)>(&sql);
    for id in entry_ids {
        query = query.bind(id);
    }

    let rows = query
        .fetch_all(db)
        .await
        .map_err(|e| AppError::data_access("failed to load mood selections for entries", e))?;

    let mut grouped: HashMap<String, Vec<MoodLinkRow>> = HashMap::new();
    for (entry_id, mood_id, role, position) in rows {
        grouped.entry(entry_id).or_default().push(MoodLinkRow {
            mood_id,
            role,
            position,
        });
    }

    Ok(grouped
        .into_iter()
        .filter_map(|(entry_id, links)| build_selection(links).map(|s| (entry_id, s)))
        .collect())
}

/// Remove all mood links for an entry. Deleting a nonexistent selection is
/// not an error.
pub async fn delete_selection(db: &SqlitePool, entry_id: &str) -> Result<(), AppError> {
    sqlx::query("DELETE FROM entry_moods WHERE entry_id = ?")
        .bind(entry_id)
        .execute(db)
        .await
        .map_err(|e| AppError::data_access("failed to delete mood selection", e))?;

    Ok(())
}
