use std::collections::HashSet;

use chrono::{Days, NaiveDate};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::analytics::resolve_range;
use crate::error::AppError;
use crate::store;

#[derive(Debug, Clone, Serialize)]
pub struct StreakReport {
    pub range_start: NaiveDate,
    pub range_end: NaiveDate,
    pub current_streak: i64,
    pub longest_streak: i64,
    pub missed_days: Vec<NaiveDate>,
}

/// Pure streak computation over a set of entry dates. A reversed range is
/// normalized before scanning.
pub fn calculate(
    entry_dates: &[NaiveDate],
    range_start: NaiveDate,
    range_end: NaiveDate,
) -> StreakReport {
    let (start, end) = if range_start > range_end {
        (range_end, range_start)
    } else {
        (range_start, range_end)
    };

    let set: HashSet<NaiveDate> = entry_dates.iter().copied().collect();

    let mut missed_days = Vec::new();
    let mut longest = 0i64;
    let mut run = 0i64;

    let mut day = start;
    while day <= end {
        if set.contains(&day) {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
            missed_days.push(day);
        }
        day = match day.checked_add_days(Days::new(1)) {
            Some(next) => next,
            None => break,
        };
    }

    // The current streak requires an entry on the end date itself, then
    // counts backward while prior days have entries.
    let mut current = 0i64;
    let mut day = end;
    while set.contains(&day) {
        current += 1;
        day = match day.checked_sub_days(Days::new(1)) {
            Some(prev) => prev,
            None => break,
        };
    }

    StreakReport {
        range_start: start,
        range_end: end,
        current_streak: current,
        longest_streak: longest,
        missed_days,
    }
}

/// Streak over stored entries, with the same range defaults as the
/// analytics engine (end = today, start = earliest entry date).
pub async fn calculate_for_range(
    db: &SqlitePool,
    range_start: Option<NaiveDate>,
    range_end: Option<NaiveDate>,
) -> Result<StreakReport, AppError> {
    let (start, end) = resolve_range(db, range_start, range_end).await?;
    let dates = store::entries::get_dates_in_range(db, start, end).await?;
    Ok(calculate(&dates, start, end))
}
