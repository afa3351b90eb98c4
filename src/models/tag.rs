use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A label attachable to many entries, deduplicated on `normalized_name`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tag {
    pub id: String,
    pub name: String,
    pub normalized_name: String,
    pub is_predefined: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tag {
    /// Build a new user-created tag. `name` must already be trimmed and
    /// length-capped by the caller.
    pub fn new(name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            normalized_name: normalize_tag_name(&name),
            name,
            is_predefined: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Case/whitespace-normalized form used for tag deduplication.
pub fn normalize_tag_name(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_name_folds_case_and_whitespace() {
        assert_eq!(normalize_tag_name("  Rust "), "rust");
        assert_eq!(normalize_tag_name("RUST"), "rust");
        assert_eq!(normalize_tag_name("rust"), "rust");
    }

    #[test]
    fn new_tag_carries_normalized_form() {
        let tag = Tag::new("Deep Work".to_string());
        assert_eq!(tag.name, "Deep Work");
        assert_eq!(tag.normalized_name, "deep work");
        assert!(!tag.is_predefined);
    }
}
