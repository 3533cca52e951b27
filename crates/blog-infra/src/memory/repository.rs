//! In-memory repositories using ordered maps behind async RwLocks.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use blog_core::domain::{
    Category, CategoryFilter, Comment, CommentFilter, Like, LikeCounts, LikeVote, NewCategory,
    NewComment, NewLike, NewPost, Page, Pagination, Post, PostChanges, PostFilter, SortOrder,
    ToggleAction,
};
use blog_core::error::RepoError;
use blog_core::ports::{
    BaseRepository, CategoryRepository, CommentRepository, LikeRepository, PostRepository,
};

/// Rows keyed by id plus an id sequence, mimicking a serial column.
struct Table<T> {
    rows: RwLock<BTreeMap<i64, T>>,
    next_id: AtomicI64,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    async fn get(&self, id: i64) -> Option<T> {
        self.rows.read().await.get(&id).cloned()
    }

    async fn remove(&self, id: i64) -> Result<(), RepoError> {
        self.rows
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }

    /// Filter, order by `(created_at, id)` and cut one page.
    async fn page(
        &self,
        keep: impl Fn(&T) -> bool,
        sort_key: impl Fn(&T) -> (DateTime<Utc>, i64),
        sort: SortOrder,
        page: Pagination,
    ) -> Page<T> {
        let rows = self.rows.read().await;
        let mut matching: Vec<T> = rows.values().filter(|row| keep(row)).cloned().collect();

        matching.sort_by_key(|row| sort_key(row));
        if sort == SortOrder::Desc {
            matching.reverse();
        }

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(page.limit as usize)
            .collect();

        Page::new(items, total)
    }
}

/// In-memory post repository.
pub struct InMemoryPostRepository {
    table: Table<Post>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            table: Table::new(),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
        let row = Post {
            id: self.table.next_id(),
            title: post.title,
            description: post.description,
            image_url: post.image_url,
            user_id: post.user_id,
            category_id: post.category_id,
            created_at: Utc::now(),
            updated_at: None,
            views_count: 0,
        };

        self.table.rows.write().await.insert(row.id, row.clone());
        Ok(row)
    }

    async fn record_view(&self, id: i64) -> Result<Post, RepoError> {
        let mut rows = self.table.rows.write().await;
        let post = rows.get_mut(&id).ok_or(RepoError::NotFound)?;
        post.views_count += 1;
        Ok(post.clone())
    }

    async fn list(&self, filter: &PostFilter, page: Pagination) -> Result<Page<Post>, RepoError> {
        Ok(self
            .table
            .page(
                |p| filter.matches(p),
                |p| (p.created_at, p.id),
                filter.sort,
                page,
            )
            .await)
    }

    async fn update_owned(&self, changes: PostChanges) -> Result<Post, RepoError> {
        let mut rows = self.table.rows.write().await;
        let post = rows
            .get_mut(&changes.id)
            .filter(|p| p.user_id == changes.user_id)
            .ok_or(RepoError::NotFound)?;

        post.title = changes.title;
        post.description = changes.description;
        post.image_url = changes.image_url;
        post.category_id = changes.category_id;
        post.updated_at = Some(Utc::now());
        Ok(post.clone())
    }

    async fn delete_owned(&self, id: i64, user_id: i64) -> Result<(), RepoError> {
        let mut rows = self.table.rows.write().await;
        match rows.get(&id) {
            Some(p) if p.user_id == user_id => {
                rows.remove(&id);
                Ok(())
            }
            _ => Err(RepoError::NotFound),
        }
    }
}

/// In-memory category repository.
pub struct InMemoryCategoryRepository {
    table: Table<Category>,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self {
            table: Table::new(),
        }
    }
}

impl Default for InMemoryCategoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Category, i64> for InMemoryCategoryRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, RepoError> {
        Ok(self.table.get(id).await)
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        self.table.remove(id).await
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn create(&self, category: NewCategory) -> Result<Category, RepoError> {
        let row = Category {
            id: self.table.next_id(),
            title: category.title,
            created_at: Utc::now(),
        };

        self.table.rows.write().await.insert(row.id, row.clone());
        Ok(row)
    }

    async fn list(
        &self,
        filter: &CategoryFilter,
        page: Pagination,
    ) -> Result<Page<Category>, RepoError> {
        Ok(self
            .table
            .page(
                |c| filter.matches(c),
                |c| (c.created_at, c.id),
                SortOrder::Desc,
                page,
            )
            .await)
    }

    async fn update(&self, id: i64, title: String) -> Result<Category, RepoError> {
        let mut rows = self.table.rows.write().await;
        let category = rows.get_mut(&id).ok_or(RepoError::NotFound)?;
        category.title = title;
        Ok(category.clone())
    }
}

/// In-memory comment repository.
pub struct InMemoryCommentRepository {
    table: Table<Comment>,
}

impl InMemoryCommentRepository {
    pub fn new() -> Self {
        Self {
            table: Table::new(),
        }
    }
}

impl Default for InMemoryCommentRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Comment, i64> for InMemoryCommentRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Comment>, RepoError> {
        Ok(self.table.get(id).await)
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        self.table.remove(id).await
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn create(&self, comment: NewComment) -> Result<Comment, RepoError> {
        let row = Comment {
            id: self.table.next_id(),
            user_id: comment.user_id,
            post_id: comment.post_id,
            description: comment.description,
            created_at: Utc::now(),
            updated_at: None,
        };

        self.table.rows.write().await.insert(row.id, row.clone());
        Ok(row)
    }

    async fn list(
        &self,
        filter: &CommentFilter,
        page: Pagination,
    ) -> Result<Page<Comment>, RepoError> {
        Ok(self
            .table
            .page(
                |c| filter.matches(c),
                |c| (c.created_at, c.id),
                SortOrder::Desc,
                page,
            )
            .await)
    }

    async fn update(&self, id: i64, description: String) -> Result<Comment, RepoError> {
        let mut rows = self.table.rows.write().await;
        let comment = rows.get_mut(&id).ok_or(RepoError::NotFound)?;
        comment.description = description;
        comment.updated_at = Some(Utc::now());
        Ok(comment.clone())
    }
}

/// In-memory like repository. The write lock makes each toggle atomic.
pub struct InMemoryLikeRepository {
    table: Table<Like>,
}

impl InMemoryLikeRepository {
    pub fn new() -> Self {
        Self {
            table: Table::new(),
        }
    }
}

impl Default for InMemoryLikeRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LikeRepository for InMemoryLikeRepository {
    async fn toggle(&self, vote: NewLike) -> Result<LikeVote, RepoError> {
        let mut rows = self.table.rows.write().await;
        let existing = rows
            .values()
            .find(|l| l.user_id == vote.user_id && l.post_id == vote.post_id)
            .cloned();

        let action = ToggleAction::decide(existing.as_ref().map(|l| l.status), vote.status);
        let like = match (action, existing) {
            (ToggleAction::Insert, _) | (_, None) => {
                let like = Like {
                    id: self.table.next_id(),
                    user_id: vote.user_id,
                    post_id: vote.post_id,
                    status: vote.status,
                };
                rows.insert(like.id, like.clone());
                like
            }
            (ToggleAction::Delete, Some(existing)) => {
                rows.remove(&existing.id);
                Like {
                    status: vote.status,
                    ..existing
                }
            }
            (ToggleAction::Update, Some(existing)) => {
                let updated = Like {
                    status: vote.status,
                    ..existing
                };
                rows.insert(updated.id, updated.clone());
                updated
            }
        };

        Ok(LikeVote {
            like,
            state: action.resulting_state(vote.status),
        })
    }

    async fn find(&self, user_id: i64, post_id: i64) -> Result<Option<Like>, RepoError> {
        Ok(self
            .table
            .rows
            .read()
            .await
            .values()
            .find(|l| l.user_id == user_id && l.post_id == post_id)
            .cloned())
    }

    async fn count_for_post(&self, post_id: i64) -> Result<LikeCounts, RepoError> {
        let rows = self.table.rows.read().await;
        let (likes, dislikes) = rows
            .values()
            .filter(|l| l.post_id == post_id)
            .fold((0, 0), |(likes, dislikes), l| {
                if l.status {
                    (likes + 1, dislikes)
                } else {
                    (likes, dislikes + 1)
                }
            });

        Ok(LikeCounts { likes, dislikes })
    }
}
