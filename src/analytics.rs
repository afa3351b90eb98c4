use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::{Days, Local, NaiveDate};
use regex::Regex;
use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::MoodCategory;
use crate::models::analytics::{AnalyticsReport, MoodDistributionPoint, WordCountPoint};
use crate::store;

// Maximal runs of Unicode letters/digits/apostrophes between word
// boundaries; a run of bare apostrophes has no boundary and never matches.
static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[\p{L}\p{N}']+\b").unwrap());

/// Resolve an optional report range: end defaults to today, start to the
/// earliest entry date (or end when there are no entries), and a reversed
/// range is swapped. Shared by the analytics engine and streak wrapper.
pub async fn resolve_range(
    db: &SqlitePool,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<(NaiveDate, NaiveDate), AppError> {
    let end = end.unwrap_or_else(|| Local::now().date_naive());

    let start = match start {
        Some(s) => s,
        None => {
            let (min, _) = store::entries::min_max_dates(db).await?;
            min.unwrap_or(end)
        }
    };

    if start > end {
        Ok((end, start))
    } else {
        Ok((start, end))
    }
}

pub async fn get_report(
    db: &SqlitePool,
    range_start: Option<NaiveDate>,
    range_end: Option<NaiveDate>,
    top_tags_limit: i64,
) -> Result<AnalyticsReport, AppError> {
    let (start, end) = resolve_range(db, range_start, range_end).await?;

    let mood_counts = store::analytics::primary_mood_category_counts(db, start, end).await?;
    let total: i64 = mood_counts.values().sum();

    let point = |category: MoodCategory| {
        let count = mood_counts.get(&category).copied().unwrap_or(0);
        let percentage = if total == 0 {
            0.0
        } else {
            count as f64 * 100.0 / total as f64
        };
        MoodDistributionPoint {
            category,
            count,
            percentage,
        }
    };

    let mood_distribution = vec![
        point(MoodCategory::Positive),
        point(MoodCategory::Neutral),
        point(MoodCategory::Negative),
    ];

    let most_frequent_mood = store::analytics::most_frequent_primary_mood(db, start, end).await?;
    let top_tags = store::analytics::top_tags(db, start, end, top_tags_limit).await?;
    let category_breakdown = store::analytics::category_breakdown(db, start, end).await?;
    let word_count_trend = build_word_count_trend(db, start, end).await?;

    Ok(AnalyticsReport {
        range_start: start,
        range_end: end,
        mood_distribution,
        most_frequent_mood,
        top_tags,
        category_breakdown,
        word_count_trend,
    })
}

async fn build_word_count_trend(
    db: &SqlitePool,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<WordCountPoint>, AppError> {
    let rows = store::analytics::entry_contents_in_range(db, start, end).await?;

    let mut by_date: HashMap<NaiveDate, i64> = HashMap::new();
    for (date, content) in rows {
        *by_date.entry(date).or_insert(0) += count_words(&content);
    }

    let mut points = Vec::new();
    let mut day = start;
    while day <= end {
        points.push(WordCountPoint {
            date: day,
            word_count: by_date.get(&day).copied().unwrap_or(0),
        });
        day = match day.checked_add_days(Days::new(1)) {
            Some(next) => next,
            None => break,
        };
    }

    Ok(points)
}

pub fn count_words(text: &str) -> i64 {
    if text.trim().is_empty() {
        return 0;
    }
    WORD_RE.find_iter(text).count() as i64
}
