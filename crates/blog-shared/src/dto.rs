//! Data Transfer Objects - request/response types for the API.
//!
//! Numeric filters use `0` for "not set" and timestamps are RFC 3339 text.

use blog_core::domain::VoteState;
use serde::{Deserialize, Serialize};

// Posts

/// Request to create a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub user_id: i64,
    pub category_id: i64,
}

/// Request to edit a post; only honoured for the post's author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub user_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub category_id: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ListPostsQuery {
    pub page: u64,
    pub limit: u64,
    pub search: String,
    pub category_id: i64,
    pub user_id: i64,
    /// `asc` or `desc`; empty keeps newest first.
    pub sort_by_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerQuery {
    pub user_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub user_id: i64,
    pub category_id: i64,
    pub created_at: String,
    pub updated_at: Option<String>,
    pub views_count: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostListResponse {
    pub posts: Vec<PostResponse>,
    pub count: u64,
}

// Categories

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRequest {
    pub title: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ListCategoriesQuery {
    pub page: u64,
    pub limit: u64,
    pub search: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: i64,
    pub title: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryListResponse {
    pub categories: Vec<CategoryResponse>,
    pub count: u64,
}

// Comments

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    pub user_id: i64,
    pub post_id: i64,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCommentRequest {
    pub user_id: i64,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GetCommentQuery {
    /// Whose profile to embed; the stored author when absent.
    pub user_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ListCommentsQuery {
    pub page: u64,
    pub limit: u64,
    pub user_id: i64,
    pub post_id: i64,
}

/// Snapshot of a commenter taken from the identity service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentUserResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub profile_image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: i64,
    pub user_id: i64,
    pub post_id: i64,
    pub description: String,
    pub created_at: String,
    pub updated_at: Option<String>,
    pub user: Option<CommentUserResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentListResponse {
    pub comments: Vec<CommentResponse>,
    pub count: u64,
}

// Likes

/// A vote. Sending the same status twice retracts it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeRequest {
    pub user_id: i64,
    pub post_id: i64,
    pub status: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeQuery {
    pub user_id: i64,
    pub post_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeCountQuery {
    pub post_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeResponse {
    pub id: i64,
    pub user_id: i64,
    pub post_id: i64,
    pub status: bool,
    /// Pair state after a vote; only set on votes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<VoteState>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeCountsResponse {
    pub likes_count: i64,
    pub dislikes_count: i64,
}
