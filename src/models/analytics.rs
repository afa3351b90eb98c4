use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

use crate::models::MoodCategory;

/// Entry count per mood category, counting only each entry's primary mood.
#[derive(Debug, Clone, Serialize)]
pub struct MoodDistributionPoint {
    pub category: MoodCategory,
    pub count: i64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MoodFrequency {
    pub mood_id: String,
    pub name: String,
    pub category: MoodCategory,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TagUsage {
    pub tag_id: String,
    pub name: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CategoryBreakdownItem {
    pub category_id: String,
    pub name: String,
    pub count: i64,
}

/// One point per calendar day in range, zero-entry days included.
#[derive(Debug, Clone, Serialize)]
pub struct WordCountPoint {
    pub date: NaiveDate,
    pub word_count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsReport {
    pub range_start: NaiveDate,
    pub range_end: NaiveDate,
    pub mood_distribution: Vec<MoodDistributionPoint>,
    pub most_frequent_mood: Option<MoodFrequency>,
    pub top_tags: Vec<TagUsage>,
    pub category_breakdown: Vec<CategoryBreakdownItem>,
    pub word_count_trend: Vec<WordCountPoint>,
}
