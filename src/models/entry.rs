use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One journal record, uniquely keyed by calendar date.
///
/// `entry_date` is stored as ISO `YYYY-MM-DD` text so range queries via
/// ordinary string comparison agree with calendar ordering. `created_at` is
/// immutable after creation; `updated_at` is reassigned on every mutation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JournalEntry {
    pub id: String,
    pub entry_date: NaiveDate,
    pub category_id: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Thin projection used by the query engine for paginated listings.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EntrySummary {
    pub id: String,
    pub entry_date: NaiveDate,
    pub title: String,
    pub category_id: String,
}

/// Summary hydrated with display names for the list surface.
#[derive(Debug, Clone, Serialize)]
pub struct EntryListItem {
    pub id: String,
    pub entry_date: NaiveDate,
    pub title: String,
    pub category_name: String,
    pub primary_mood_name: String,
    pub tags: Vec<String>,
}
