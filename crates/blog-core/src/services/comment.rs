use std::sync::Arc;

use futures::future::try_join_all;

use crate::domain::{
    Comment, CommentFilter, CommentWithAuthor, NewComment, Page, Pagination, UserProfile,
};
use crate::error::{DomainError, RepoError};
use crate::ports::{CommentRepository, IdentityError, UserDirectory};

use super::{internal, non_zero, require_id, require_text};

#[derive(Debug, Clone, Default)]
pub struct ListCommentsParams {
    pub page: u64,
    pub limit: u64,
    pub user_id: i64,
    pub post_id: i64,
}

/// Comment operations. Every returned comment carries a user snapshot
/// fetched live from the identity service.
pub struct CommentService {
    repo: Arc<dyn CommentRepository>,
    users: Arc<dyn UserDirectory>,
}

impl CommentService {
    pub fn new(repo: Arc<dyn CommentRepository>, users: Arc<dyn UserDirectory>) -> Self {
        Self { repo, users }
    }

    /// Store a comment, then attach its author's profile.
    ///
    /// An identity failure fails the call but the stored row stays.
    pub async fn create(&self, comment: NewComment) -> Result<CommentWithAuthor, DomainError> {
        require_id("user_id", comment.user_id)?;
        require_id("post_id", comment.post_id)?;
        require_text("description", &comment.description)?;

        let author_id = comment.user_id;
        let comment = self
            .repo
            .create(comment)
            .await
            .map_err(|e| internal("failed to create comment", e))?;

        let author = self.resolve(author_id, "failed to get user").await?;
        Ok(CommentWithAuthor {
            comment,
            author: Some(author),
        })
    }

    /// Fetch a comment.
    ///
    /// With a `viewer_id` the snapshot describes that user and is resolved
    /// before the row is read; otherwise it describes the stored author.
    /// An unknown user is a not-found; any other identity failure is logged
    /// and the comment is returned without a snapshot.
    pub async fn get(
        &self,
        id: i64,
        viewer_id: Option<i64>,
    ) -> Result<CommentWithAuthor, DomainError> {
        let viewer = match viewer_id.and_then(non_zero) {
            Some(user_id) => Some(self.resolve_lenient(user_id).await?),
            None => None,
        };

        let comment = self
            .repo
            .find_by_id(id)
            .await
            .map_err(|e| internal("failed to get comment", e))?
            .ok_or_else(|| DomainError::not_found("comment", id))?;

        let author = match viewer {
            Some(profile) => profile,
            None => self.resolve_lenient(comment.user_id).await?,
        };

        Ok(CommentWithAuthor { comment, author })
    }

    /// List comments. One identity lookup per comment; a single failure
    /// fails the whole page.
    pub async fn list(
        &self,
        params: ListCommentsParams,
    ) -> Result<Page<CommentWithAuthor>, DomainError> {
        let filter = CommentFilter {
            user_id: non_zero(params.user_id),
            post_id: non_zero(params.post_id),
        };

        let page = self
            .repo
            .list(&filter, Pagination::new(params.page, params.limit))
            .await
            .map_err(|e| internal("failed to get all comments", e))?;

        let users = &self.users;
        let items = try_join_all(page.items.into_iter().map(|comment| async move {
            let author = users.get_user(comment.user_id).await?;
            Ok::<_, IdentityError>(CommentWithAuthor {
                comment,
                author: Some(author),
            })
        }))
        .await
        .map_err(|e| internal("failed to get user in get-all comments", e))?;

        Ok(Page::new(items, page.total))
    }

    /// Replace a comment's text, then attach the profile of `author_id`.
    pub async fn update(
        &self,
        id: i64,
        description: String,
        author_id: i64,
    ) -> Result<CommentWithAuthor, DomainError> {
        require_text("description", &description)?;
        require_id("user_id", author_id)?;

        let comment = match self.repo.update(id, description).await {
            Ok(comment) => comment,
            Err(RepoError::NotFound) => return Err(DomainError::not_found("comment", id)),
            Err(e) => return Err(internal("failed to update comment", e)),
        };

        let author = self
            .resolve(author_id, "failed to get user when updating the comment")
            .await?;
        Ok(CommentWithAuthor {
            comment,
            author: Some(author),
        })
    }

    /// Delete by id. Not scoped to the author.
    pub async fn delete(&self, id: i64) -> Result<(), DomainError> {
        match self.repo.delete(id).await {
            Ok(()) => Ok(()),
            Err(RepoError::NotFound) => Err(DomainError::not_found("comment", id)),
            Err(e) => Err(internal("failed to delete comment", e)),
        }
    }

    async fn resolve(&self, user_id: i64, context: &str) -> Result<UserProfile, DomainError> {
        self.users
            .get_user(user_id)
            .await
            .map_err(|e| internal(context, e))
    }

    async fn resolve_lenient(&self, user_id: i64) -> Result<Option<UserProfile>, DomainError> {
        match self.users.get_user(user_id).await {
            Ok(profile) => Ok(Some(profile)),
            Err(IdentityError::NotFound(id)) => {
                tracing::warn!(user_id = id, "User not found in comment service");
                Err(DomainError::not_found("user", id))
            }
            Err(e) => {
                tracing::warn!(user_id, error = %e, "Identity lookup failed, returning comment without user");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;

    use super::*;
    use crate::ports::BaseRepository;

    #[derive(Default)]
    struct FakeComments {
        rows: Mutex<Vec<Comment>>,
    }

    #[async_trait]
    impl BaseRepository<Comment, i64> for FakeComments {
        async fn find_by_id(&self, id: i64) -> Result<Option<Comment>, RepoError> {
            Ok(self.rows.lock().unwrap().iter().find(|c| c.id == id).cloned())
        }

        async fn delete(&self, id: i64) -> Result<(), RepoError> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|c| c.id != id);
            if rows.len() == before {
                return Err(RepoError::NotFound);
            }
            Ok(())
        }
    }

    #[async_trait]
    impl CommentRepository for FakeComments {
        async fn create(&self, comment: NewComment) -> Result<Comment, RepoError> {
            let mut rows = self.rows.lock().unwrap();
            let row = Comment {
                id: rows.len() as i64 + 1,
                user_id: comment.user_id,
                post_id: comment.post_id,
                description: comment.description,
                created_at: Utc::now(),
                updated_at: None,
            };
            rows.push(row.clone());
            Ok(row)
        }

        async fn list(
            &self,
            filter: &CommentFilter,
            _page: Pagination,
        ) -> Result<Page<Comment>, RepoError> {
            let items: Vec<_> = self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|c| filter.matches(c))
                .cloned()
                .collect();
            let total = items.len() as u64;
            Ok(Page::new(items, total))
        }

        async fn update(&self, _id: i64, _description: String) -> Result<Comment, RepoError> {
            Err(RepoError::NotFound)
        }
    }

    /// Knows a fixed set of users; any id in `broken` fails as unavailable.
    struct FakeDirectory {
        users: HashMap<i64, UserProfile>,
        broken: Vec<i64>,
    }

    impl FakeDirectory {
        fn new(ids: &[i64], broken: &[i64]) -> Self {
            let users = ids
                .iter()
                .map(|&id| {
                    (
                        id,
                        UserProfile {
                            id,
                            first_name: format!("First{}", id),
                            last_name: format!("Last{}", id),
                            email: format!("user{}@example.com", id),
                            profile_image_url: None,
                        },
                    )
                })
                .collect();
            Self {
                users,
                broken: broken.to_vec(),
            }
        }
    }

    #[async_trait]
    impl UserDirectory for FakeDirectory {
        async fn get_user(&self, id: i64) -> Result<UserProfile, IdentityError> {
            if self.broken.contains(&id) {
                return Err(IdentityError::Unavailable("connection refused".to_string()));
            }
            self.users.get(&id).cloned().ok_or(IdentityError::NotFound(id))
        }
    }

    fn service(known: &[i64], broken: &[i64]) -> CommentService {
        CommentService::new(
            Arc::new(FakeComments::default()),
            Arc::new(FakeDirectory::new(known, broken)),
        )
    }

    fn new_comment(user_id: i64) -> NewComment {
        NewComment {
            user_id,
            post_id: 9,
            description: "nice".to_string(),
        }
    }

    #[tokio::test]
    async fn create_attaches_author_snapshot() {
        let svc = service(&[3], &[]);
        let created = svc.create(new_comment(3)).await.unwrap();
        assert!(created.comment.id > 0);
        assert_eq!(created.author.unwrap().id, 3);
    }

    #[tokio::test]
    async fn create_fails_when_author_cannot_be_resolved() {
        let svc = service(&[], &[]);
        let err = svc.create(new_comment(3)).await.unwrap_err();
        assert!(matches!(err, DomainError::Internal(_)));
    }

    #[tokio::test]
    async fn get_swallows_identity_outage() {
        let svc = service(&[3], &[4]);
        let created = svc.create(new_comment(3)).await.unwrap();

        let fetched = svc.get(created.comment.id, Some(4)).await.unwrap();
        assert_eq!(fetched.comment.id, created.comment.id);
        assert!(fetched.author.is_none());
    }

    #[tokio::test]
    async fn get_reports_unknown_viewer_as_not_found() {
        let svc = service(&[3], &[]);
        let created = svc.create(new_comment(3)).await.unwrap();

        let err = svc.get(created.comment.id, Some(42)).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity_type: "user", .. }));
    }

    #[tokio::test]
    async fn get_missing_comment_is_not_found() {
        let svc = service(&[3], &[]);
        let err = svc.get(77, Some(3)).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity_type: "comment", .. }));
    }

    #[tokio::test]
    async fn list_fails_whole_page_on_single_lookup_failure() {
        let svc = service(&[3], &[5]);
        svc.create(new_comment(3)).await.unwrap();
        // Stored directly: the author is unresolvable from the start.
        svc.repo.create(new_comment(5)).await.unwrap();

        let err = svc.list(ListCommentsParams::default()).await.unwrap_err();
        assert!(matches!(err, DomainError::Internal(_)));
    }

    #[tokio::test]
    async fn delete_missing_comment_is_not_found() {
        let svc = service(&[3], &[]);
        assert!(matches!(
            svc.delete(1).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
