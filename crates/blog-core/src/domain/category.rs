use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category entity - groups posts by topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub title: String,
}

#[derive(Debug, Clone, Default)]
pub struct CategoryFilter {
    pub search: Option<String>,
}

impl CategoryFilter {
    pub fn matches(&self, category: &Category) -> bool {
        self.search.as_deref().is_none_or(|needle| {
            category
                .title
                .to_lowercase()
                .contains(&needle.to_lowercase())
        })
    }
}
