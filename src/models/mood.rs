use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Coarse grouping a mood belongs to, used by the analytics distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT")]
pub enum MoodCategory {
    #[serde(rename = "positive")]
    #[sqlx(rename = "positive")]
    Positive,
    #[serde(rename = "neutral")]
    #[sqlx(rename = "neutral")]
    Neutral,
    #[serde(rename = "negative")]
    #[sqlx(rename = "negative")]
    Negative,
}

/// Role of a mood link on an entry. Exactly one primary per entry; up to two
/// ordered secondaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT")]
pub enum MoodRole {
    #[serde(rename = "primary")]
    #[sqlx(rename = "primary")]
    Primary,
    #[serde(rename = "secondary")]
    #[sqlx(rename = "secondary")]
    Secondary,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Mood {
    pub id: String,
    pub name: String,
    pub category: MoodCategory,
    pub is_predefined: bool,
}

/// The mood classification owned by an entry: one mandatory primary and up
/// to two ordered secondaries, all distinct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodSelection {
    pub primary_mood_id: String,
    #[serde(default)]
    pub secondary_mood_ids: Vec<String>,
}
