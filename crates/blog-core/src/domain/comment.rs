use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserProfile;

/// Comment entity - a user's remark on a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub user_id: i64,
    pub post_id: i64,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub user_id: i64,
    pub post_id: i64,
    pub description: String,
}

#[derive(Debug, Clone, Default)]
pub struct CommentFilter {
    pub user_id: Option<i64>,
    pub post_id: Option<i64>,
}

impl CommentFilter {
    pub fn matches(&self, comment: &Comment) -> bool {
        self.user_id.is_none_or(|id| comment.user_id == id)
            && self.post_id.is_none_or(|id| comment.post_id == id)
    }
}

/// A stored comment joined with a live snapshot of a user profile.
///
/// The snapshot is fetched per request and never persisted. It is `None`
/// only when a tolerated identity lookup failed.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentWithAuthor {
    pub comment: Comment,
    pub author: Option<UserProfile>,
}
