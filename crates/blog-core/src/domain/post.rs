use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::SortOrder;

/// Post entity - a blog article written by a user of the identity service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    /// Author; owned by the identity service.
    pub user_id: i64,
    pub category_id: i64,
    pub created_at: DateTime<Utc>,
    /// `None` until the first update.
    pub updated_at: Option<DateTime<Utc>>,
    pub views_count: i32,
}

/// Fields supplied when creating a post. The store assigns the rest.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub user_id: i64,
    pub category_id: i64,
}

/// An owner-scoped edit. Applies only where both `id` and `user_id` match.
#[derive(Debug, Clone)]
pub struct PostChanges {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub category_id: i64,
}

/// List filters; `None` means "do not filter".
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    pub search: Option<String>,
    pub category_id: Option<i64>,
    pub user_id: Option<i64>,
    pub sort: SortOrder,
}

impl PostFilter {
    /// Whether a post passes every active filter.
    pub fn matches(&self, post: &Post) -> bool {
        let title_ok = self.search.as_deref().is_none_or(|needle| {
            post.title
                .to_lowercase()
                .contains(&needle.to_lowercase())
        });

        title_ok
            && self.category_id.is_none_or(|id| post.category_id == id)
            && self.user_id.is_none_or(|id| post.user_id == id)
    }
}
