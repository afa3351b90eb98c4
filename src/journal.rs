use std::collections::HashSet;

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{EntryListItem, EntrySummary, JournalEntry, MoodSelection};
use crate::store;
use crate::store::search::SearchQuery;

const TITLE_MAX_CHARS: usize = 200;

/// Entry together with its owned relations, for the detail surface.
#[derive(Debug, Clone, Serialize)]
pub struct EntryDetail {
    #[serde(flatten)]
    pub entry: JournalEntry,
    pub mood: Option<MoodSelection>,
    pub tag_ids: Vec<String>,
}

/// Create a journal entry for a date, with its mood selection and tag set.
///
/// Validation happens before any write; the entry row is inserted first and
/// the relations are replaced afterwards, each in its own transaction.
pub async fn create(
    db: &SqlitePool,
    entry_date: NaiveDate,
    category_id: &str,
    mood: &MoodSelection,
    tag_ids: &[String],
    title: &str,
    content: &str,
) -> Result<JournalEntry, AppError> {
    ensure_category_valid(db, category_id).await?;
    ensure_mood_selection_valid(db, mood).await?;
    ensure_tags_valid(db, tag_ids).await?;

    let title = normalize_title(title)?;
    let content = content.trim().to_string();

    // One journal entry per day. The unique index catches the race where
    // two writers hit the same date between this check and the insert.
    if store::entries::get_by_date(db, entry_date).await?.is_some() {
        return Err(AppError::conflict(format!(
            "an entry for {} already exists",
            entry_date.format("%Y-%m-%d")
        )));
    }

    let now = Utc::now();
    let entry = JournalEntry {
        id: Uuid::new_v4().to_string(),
        entry_date,
        category_id: category_id.to_string(),
        title,
        content,
        created_at: now,
        updated_at: now,
    };

    store::entries::insert(db, &entry).await?;
    store::moods::replace_selection(db, &entry.id, mood).await?;
    store::tags::replace_tags(db, &entry.id, tag_ids).await?;

    tracing::info!(entry_id = %entry.id, date = %entry.entry_date, "created journal entry");
    Ok(entry)
}

/// Update an existing entry. `entry_date` and `created_at` are preserved;
/// `updated_at` is reassigned.
pub async fn update(
    db: &SqlitePool,
    id: &str,
    category_id: &str,
    mood: &MoodSelection,
    tag_ids: &[String],
    title: &str,
    content: &str,
) -> Result<JournalEntry, AppError> {
    let existing = store::entries::get_by_id(db, id)
        .await?
        .ok_or_else(|| AppError::not_found("journal entry does not exist"))?;

    ensure_category_valid(db, category_id).await?;
    ensure_mood_selection_valid(db, mood).await?;
    ensure_tags_valid(db, tag_ids).await?;

    let updated = JournalEntry {
        id: existing.id,
        entry_date: existing.entry_date,
        category_id: category_id.to_string(),
        title: normalize_title(title)?,
        content: content.trim().to_string(),
        created_at: existing.created_at,
        updated_at: Utc::now(),
    };

    store::entries::update(db, &updated).await?;
    store::moods::replace_selection(db, &updated.id, mood).await?;
    store::tags::replace_tags(db, &updated.id, tag_ids).await?;

    Ok(updated)
}

/// Delete an entry and its relations. Unknown ids are a no-op. Relations go
/// first so none can outlive the entry row if a later step fails.
pub async fn delete(db: &SqlitePool, id: &str) -> Result<(), AppError> {
    if store::entries::get_by_id(db, id).await?.is_none() {
        return Ok(());
    }

    store::tags::replace_tags(db, id, &[]).await?;
    store::moods::delete_selection(db, id).await?;
    store::entries::delete(db, id).await?;

    tracing::info!(entry_id = %id, "deleted journal entry");
    Ok(())
}

pub async fn get_detail(db: &SqlitePool, id: &str) -> Result<EntryDetail, AppError> {
    let entry = store::entries::get_by_id(db, id)
        .await?
        .ok_or_else(|| AppError::not_found("journal entry does not exist"))?;

    hydrate_detail(db, entry).await
}

pub async fn get_detail_by_date(
    db: &SqlitePool,
    entry_date: NaiveDate,
) -> Result<EntryDetail, AppError> {
    let entry = store::entries::get_by_date(db, entry_date)
        .await?
        .ok_or_else(|| AppError::not_found("journal entry does not exist"))?;

    hydrate_detail(db, entry).await
}

async fn hydrate_detail(db: &SqlitePool, entry: JournalEntry) -> Result<EntryDetail, AppError> {
    let mood = store::moods::get_selection(db, &entry.id).await?;
    let tag_ids = store::tags::get_tag_ids(db, &entry.id).await?;

    Ok(EntryDetail {
        entry,
        mood,
        tag_ids,
    })
}

/// Filtered, paginated listing, hydrated with category, primary-mood, and
/// tag names via the batch ports.
pub async fn search_list_page(
    db: &SqlitePool,
    query: &SearchQuery,
    offset: i64,
    limit: i64,
) -> Result<Vec<EntryListItem>, AppError> {
    let summaries = store::search::search_summaries(db, query, offset, limit).await?;
    hydrate_list_items(db, summaries).await
}

async fn hydrate_list_items(
    db: &SqlitePool,
    summaries: Vec<EntrySummary>,
) -> Result<Vec<EntryListItem>, AppError> {
    if summaries.is_empty() {
        return Ok(Vec::new());
    }

    let entry_ids: Vec<String> = summaries.iter().map(|s| s.id.clone()).collect();

    let mut category_ids: Vec<String> = Vec::new();
    for s in &summaries {
        if !category_ids.contains(&s.category_id) {
            category_ids.push(s.category_id.clone());
        }
    }

    let category_names = store::vocab::category_names_by_id(db, &category_ids).await?;
    let mood_names = store::vocab::mood_names(db).await?;
    let primary_by_entry = store::moods::primary_mood_ids_by_entry(db, &entry_ids).await?;
    let tags_by_entry = store::tags::tag_ids_by_entry(db, &entry_ids).await?;

    let mut all_tag_ids: Vec<String> = Vec::new();
    for ids in tags_by_entry.values() {
        for id in ids {
            if !all_tag_ids.contains(id) {
                all_tag_ids.push(id.clone());
            }
        }
    }
    let tag_names = store::tags::names_by_id(db, &all_tag_ids).await?;

    let unknown = || "Unknown".to_string();

    Ok(summaries
        .into_iter()
        .map(|s| {
            let category_name = category_names.get(&s.category_id).cloned().unwrap_or_else(unknown);
            let primary_mood_name = primary_by_entry
                .get(&s.id)
                .and_then(|mood_id| mood_names.get(mood_id).cloned())
                .unwrap_or_else(unknown);
            let tags = tags_by_entry
                .get(&s.id)
                .map(|ids| {
                    ids.iter()
                        .map(|id| tag_names.get(id).cloned().unwrap_or_else(unknown))
                        .collect()
                })
                .unwrap_or_default();

            EntryListItem {
                id: s.id,
                entry_date: s.entry_date,
                title: s.title,
                category_name,
                primary_mood_name,
                tags,
            }
        })
        .collect())
}

async fn ensure_category_valid(db: &SqlitePool, category_id: &str) -> Result<(), AppError> {
    if category_id.is_empty() {
        return Err(AppError::validation("category is required"));
    }
    if !store::vocab::category_exists(db, category_id).await? {
        return Err(AppError::validation("selected category does not exist"));
    }
    Ok(())
}

async fn ensure_mood_selection_valid(
    db: &SqlitePool,
    selection: &MoodSelection,
) -> Result<(), AppError> {
    if selection.primary_mood_id.is_empty() {
        return Err(AppError::validation("primary mood is required"));
    }

    let secondary: Vec<&String> = selection
        .secondary_mood_ids
        .iter()
        .filter(|id| !id.is_empty())
        .collect();

    if secondary.len() > 2 {
        return Err(AppError::validation("up to two secondary moods are allowed"));
    }
    if secondary.iter().any(|id| **id == selection.primary_mood_id) {
        return Err(AppError::validation(
            "primary mood cannot be also selected as secondary",
        ));
    }
    if secondary.iter().collect::<HashSet<_>>().len() != secondary.len() {
        return Err(AppError::validation("secondary moods must be distinct"));
    }

    if !store::vocab::mood_exists(db, &selection.primary_mood_id).await? {
        return Err(AppError::validation("selected primary mood does not exist"));
    }
    for id in secondary {
        if !store::vocab::mood_exists(db, id).await? {
            return Err(AppError::validation(
                "one of the selected secondary moods does not exist",
            ));
        }
    }

    Ok(())
}

async fn ensure_tags_valid(db: &SqlitePool, tag_ids: &[String]) -> Result<(), AppError> {
    let non_empty: Vec<&String> = tag_ids.iter().filter(|id| !id.is_empty()).collect();
    let distinct: HashSet<&String> = non_empty.iter().copied().collect();

    if distinct.len() != non_empty.len() {
        return Err(AppError::validation("duplicate tags are not allowed"));
    }
    if distinct.is_empty() {
        return Ok(());
    }

    let ids: Vec<String> = distinct.into_iter().cloned().collect();
    let existing = store::tags::get_by_ids(db, &ids).await?;
    if existing.len() != ids.len() {
        return Err(AppError::validation("one or more selected tags do not exist"));
    }

    Ok(())
}

fn normalize_title(title: &str) -> Result<String, AppError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("title is required"));
    }
    if trimmed.chars().count() > TITLE_MAX_CHARS {
        Ok(trimmed.chars().take(TITLE_MAX_CHARS).collect())
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_is_trimmed() {
        assert_eq!(normalize_title("  A quiet day  ").unwrap(), "A quiet day");
    }

    #[test]
    fn blank_title_is_rejected() {
        assert!(matches!(
            normalize_title("   "),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn long_title_is_truncated_to_200_chars() {
        let long = "x".repeat(300);
        assert_eq!(normalize_title(&long).unwrap().chars().count(), 200);
    }
}
