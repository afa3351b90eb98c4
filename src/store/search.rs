use chrono::NaiveDate;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::error::AppError;
use crate::models::EntrySummary;

const DEFAULT_PAGE_SIZE: i64 = 20;

/// Multi-criteria entry search. Every filter is optional; set filters are
/// AND-semantics (an entry must carry every listed mood/tag id).
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub category_id: Option<String>,
    pub text: Option<String>,
    pub mood_ids: Vec<String>,
    pub tag_ids: Vec<String>,
}

/// Escape LIKE metacharacters so `%`, `_`, and the escape char itself match
/// literally in user input.
fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn distinct_non_empty(ids: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for id in ids {
        if !id.is_empty() && !out.contains(id) {
            out.push(id.clone());
        }
    }
    out
}

pub async fn search_summaries(
    db: &SqlitePool,
    query: &SearchQuery,
    offset: i64,
    limit: i64,
) -> Result<Vec<EntrySummary>, AppError> {
    let offset = offset.max(0);
    let limit = if limit <= 0 { DEFAULT_PAGE_SIZE } else { limit };

    let mut qb: QueryBuilder<Sqlite> =
        QueryBuilder::new("SELECT e.id, e.entry_date, e.title, e.category_id FROM entries e WHERE 1=1");

    if let Some(start) = query.start_date {
        qb.push(" AND e.entry_date >= ").push_bind(start);
    }
    if let Some(end) = query.end_date {
        qb.push(" AND e.entry_date <= ").push_bind(end);
    }

    if let Some(category_id) = query.category_id.as_ref().filter(|c| !c.is_empty()) {
        qb.push(" AND e.category_id = ").push_bind(category_id.clone());
    }

    if let Some(text) = query.text.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        let pattern = format!("%{}%", escape_like(text));
        qb.push(" AND (e.title LIKE ")
            .push_bind(pattern.clone())
            .push(" ESCAPE '\\' OR e.content LIKE ")
            .push_bind(pattern)
            .push(" ESCAPE '\\')");
    }

    // AND-semantics over the mood/tag sets: count distinct matching links
    // per entry and require the count to equal the set size.
    let mood_ids = distinct_non_empty(&query.mood_ids);
    if !mood_ids.is_empty() {
        qb.push(
            " AND (SELECT COUNT(DISTINCT em.mood_id) FROM entry_moods em \
             WHERE em.entry_id = e.id AND em.mood_id IN (",
        );
        let mut separated = qb.separated(", ");
        for id in &mood_ids {
            separated.push_bind(id.clone());
        }
        qb.push(")) = ").push_bind(mood_ids.len() as i64);
    }

    let tag_ids = distinct_non_empty(&query.tag_ids);
    if !tag_ids.is_empty() {
        qb.push(
            " AND (SELECT COUNT(DISTINCT et.tag_id) FROM entry_tags et \
             WHERE et.entry_id = e.id AND et.tag_id IN (",
        );
        let mut separated = qb.separated(", ");
        for id in &tag_ids {
            separated.push_bind(id.clone());
        }
        qb.push(")) = ").push_bind(tag_ids.len() as i64);
    }

    qb.push(" ORDER BY e.entry_date DESC LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);

    qb.build_query_as()
        .fetch_all(db)
        .await
        .map_err(|e| AppError::data_access("failed to search journal entry summaries", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_like_escapes_all_metacharacters() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[test]
    fn distinct_non_empty_drops_blanks_and_duplicates() {
        let ids = vec![
            "a".to_string(),
            String::new(),
            "b".to_string(),
            "a".to_string(),
        ];
        assert_eq!(distinct_non_empty(&ids), vec!["a", "b"]);
    }
}
