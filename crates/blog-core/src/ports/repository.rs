use async_trait::async_trait;

use crate::domain::{
    Category, CategoryFilter, Comment, CommentFilter, Like, LikeCounts, LikeVote, NewCategory,
    NewComment, NewLike, NewPost, Page, Pagination, Post, PostChanges, PostFilter,
};
use crate::error::RepoError;

/// Generic repository trait for entities with plain id lookups.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Delete an entity by its ID. `RepoError::NotFound` if nothing was deleted.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository. Lookups and writes are not plain id operations:
/// reads bump the view counter and writes are scoped to the author.
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Increment the view counter of `id` and return the updated row.
    async fn record_view(&self, id: i64) -> Result<Post, RepoError>;

    async fn list(&self, filter: &PostFilter, page: Pagination) -> Result<Page<Post>, RepoError>;

    /// Apply `changes` where both id and author match; `NotFound` otherwise.
    async fn update_owned(&self, changes: PostChanges) -> Result<Post, RepoError>;

    /// Delete where both id and author match; `NotFound` otherwise.
    async fn delete_owned(&self, id: i64, user_id: i64) -> Result<(), RepoError>;
}

/// Category repository.
#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, i64> {
    async fn create(&self, category: NewCategory) -> Result<Category, RepoError>;

    async fn list(
        &self,
        filter: &CategoryFilter,
        page: Pagination,
    ) -> Result<Page<Category>, RepoError>;

    async fn update(&self, id: i64, title: String) -> Result<Category, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, i64> {
    async fn create(&self, comment: NewComment) -> Result<Comment, RepoError>;

    async fn list(
        &self,
        filter: &CommentFilter,
        page: Pagination,
    ) -> Result<Page<Comment>, RepoError>;

    /// Replace the description and stamp `updated_at`.
    async fn update(&self, id: i64, description: String) -> Result<Comment, RepoError>;
}

/// Like repository.
#[async_trait]
pub trait LikeRepository: Send + Sync {
    /// Apply the toggle rule for `(user_id, post_id)`.
    async fn toggle(&self, vote: NewLike) -> Result<LikeVote, RepoError>;

    async fn find(&self, user_id: i64, post_id: i64) -> Result<Option<Like>, RepoError>;

    async fn count_for_post(&self, post_id: i64) -> Result<LikeCounts, RepoError>;
}
