use std::sync::Arc;

use crate::domain::{NewPost, Page, Pagination, Post, PostChanges, PostFilter, SortOrder};
use crate::error::{DomainError, RepoError};
use crate::ports::PostRepository;

use super::{internal, non_empty, non_zero, require_id, require_text};

/// Raw list parameters as they arrive on the wire.
#[derive(Debug, Clone, Default)]
pub struct ListPostsParams {
    pub page: u64,
    pub limit: u64,
    pub search: String,
    pub category_id: i64,
    pub user_id: i64,
    pub sort_by_date: String,
}

/// Post operations.
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, mut post: NewPost) -> Result<Post, DomainError> {
        require_text("title", &post.title)?;
        require_id("user_id", post.user_id)?;
        require_id("category_id", post.category_id)?;
        post.image_url = post.image_url.and_then(non_empty);

        let created = self
            .repo
            .create(post)
            .await
            .map_err(|e| internal("failed to create post", e))?;

        tracing::debug!(post_id = created.id, user_id = created.user_id, "Post created");
        Ok(created)
    }

    /// Fetch a post, counting the read as a view.
    pub async fn get(&self, id: i64) -> Result<Post, DomainError> {
        match self.repo.record_view(id).await {
            Ok(post) => Ok(post),
            Err(RepoError::NotFound) => Err(DomainError::not_found("post", id)),
            Err(e) => Err(internal("failed to get post", e)),
        }
    }

    pub async fn list(&self, params: ListPostsParams) -> Result<Page<Post>, DomainError> {
        let filter = PostFilter {
            search: non_empty(params.search),
            category_id: non_zero(params.category_id),
            user_id: non_zero(params.user_id),
            sort: SortOrder::parse_directive(&params.sort_by_date)?,
        };
        let page = Pagination::new(params.page, params.limit);

        self.repo
            .list(&filter, page)
            .await
            .map_err(|e| internal("failed to get all posts", e))
    }

    /// Edit a post owned by `changes.user_id`.
    ///
    /// A missing post and a post owned by someone else are indistinguishable
    /// here; both yield `NotFoundOrNotOwned`.
    pub async fn update(&self, mut changes: PostChanges) -> Result<Post, DomainError> {
        require_text("title", &changes.title)?;
        require_id("user_id", changes.user_id)?;
        require_id("category_id", changes.category_id)?;
        changes.image_url = changes.image_url.and_then(non_empty);

        let id = changes.id;
        match self.repo.update_owned(changes).await {
            Ok(post) => Ok(post),
            Err(RepoError::NotFound) => {
                tracing::warn!(post_id = id, "Update matched no post owned by caller");
                Err(DomainError::NotFoundOrNotOwned {
                    entity_type: "post",
                    id,
                })
            }
            Err(e) => Err(internal("failed to update post", e)),
        }
    }

    pub async fn delete(&self, id: i64, user_id: i64) -> Result<(), DomainError> {
        require_id("user_id", user_id)?;

        match self.repo.delete_owned(id, user_id).await {
            Ok(()) => Ok(()),
            Err(RepoError::NotFound) => {
                tracing::warn!(post_id = id, user_id, "Delete matched no post owned by caller");
                Err(DomainError::NotFoundOrNotOwned {
                    entity_type: "post",
                    id,
                })
            }
            Err(e) => Err(internal("failed to delete post", e)),
        }
    }
}
