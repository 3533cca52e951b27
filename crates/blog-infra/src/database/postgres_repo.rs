//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, Func, OnConflict, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait,
    FromQueryResult, Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Statement,
    TransactionTrait, TryInsertResult,
};

use blog_core::domain::{
    Category, CategoryFilter, Comment, CommentFilter, Like, LikeCounts, LikeVote, NewCategory,
    NewComment, NewLike, NewPost, Page, Pagination, Post, PostChanges, PostFilter, SortOrder,
    ToggleAction,
};
use blog_core::error::RepoError;
use blog_core::ports::{CategoryRepository, CommentRepository, LikeRepository, PostRepository};

use super::entity::category::{self, Entity as CategoryEntity};
use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::like::{self, Entity as LikeEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, db_err};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL category repository.
pub type PostgresCategoryRepository = PostgresBaseRepository<CategoryEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

/// PostgreSQL like repository.
pub type PostgresLikeRepository = PostgresBaseRepository<LikeEntity>;

/// Attempts at settling a toggle when a concurrent writer removes the row
/// between the conflicting insert and the locking read.
const TOGGLE_ATTEMPTS: usize = 3;

/// `LIKE` pattern matching `search` literally anywhere, lowercased.
pub(crate) fn like_pattern(search: &str) -> String {
    let mut escaped = String::with_capacity(search.len() + 2);
    escaped.push('%');
    for ch in search.to_lowercase().chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

/// Case-insensitive substring match on a title column.
fn title_contains(column: impl sea_orm::sea_query::IntoColumnRef, search: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column))).like(like_pattern(search))
}

fn order_of(sort: SortOrder) -> Order {
    match sort {
        SortOrder::Asc => Order::Asc,
        SortOrder::Desc => Order::Desc,
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
        let model = post::ActiveModel::from(post)
            .insert(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.into())
    }

    async fn record_view(&self, id: i64) -> Result<Post, RepoError> {
        tracing::debug!(post_id = id, "Recording post view");

        // Increment and read back in one statement.
        let rows = PostEntity::update_many()
            .col_expr(
                post::Column::ViewsCount,
                Expr::col(post::Column::ViewsCount).add(1),
            )
            .filter(post::Column::Id.eq(id))
            .exec_with_returning(&self.db)
            .await
            .map_err(db_err)?;

        rows.into_iter()
            .next()
            .map(Into::into)
            .ok_or(RepoError::NotFound)
    }

    async fn list(&self, filter: &PostFilter, page: Pagination) -> Result<Page<Post>, RepoError> {
        let mut query = PostEntity::find();
        if let Some(search) = &filter.search {
            query = query.filter(title_contains(post::Column::Title, search));
        }
        if let Some(category_id) = filter.category_id {
            query = query.filter(post::Column::CategoryId.eq(category_id));
        }
        if let Some(user_id) = filter.user_id {
            query = query.filter(post::Column::UserId.eq(user_id));
        }

        let total = query.clone().count(&self.db).await.map_err(db_err)?;

        let order = order_of(filter.sort);
        let rows = query
            .order_by(post::Column::CreatedAt, order.clone())
            .order_by(post::Column::Id, order)
            .offset(page.offset())
            .limit(page.limit)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(Page::new(rows.into_iter().map(Into::into).collect(), total))
    }

    async fn update_owned(&self, changes: PostChanges) -> Result<Post, RepoError> {
        let now: sea_orm::prelude::DateTimeWithTimeZone = Utc::now().into();

        let rows = PostEntity::update_many()
            .col_expr(post::Column::Title, Expr::value(changes.title))
            .col_expr(post::Column::Description, Expr::value(changes.description))
            .col_expr(post::Column::ImageUrl, Expr::value(changes.image_url))
            .col_expr(post::Column::CategoryId, Expr::value(changes.category_id))
            .col_expr(post::Column::UpdatedAt, Expr::value(now))
            .filter(post::Column::Id.eq(changes.id))
            .filter(post::Column::UserId.eq(changes.user_id))
            .exec_with_returning(&self.db)
            .await
            .map_err(db_err)?;

        rows.into_iter()
            .next()
            .map(Into::into)
            .ok_or(RepoError::NotFound)
    }

    async fn delete_owned(&self, id: i64, user_id: i64) -> Result<(), RepoError> {
        let result = PostEntity::delete_many()
            .filter(post::Column::Id.eq(id))
            .filter(post::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn create(&self, category: NewCategory) -> Result<Category, RepoError> {
        let model = category::ActiveModel::from(category)
            .insert(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.into())
    }

    async fn list(
        &self,
        filter: &CategoryFilter,
        page: Pagination,
    ) -> Result<Page<Category>, RepoError> {
        let mut query = CategoryEntity::find();
        if let Some(search) = &filter.search {
            query = query.filter(title_contains(category::Column::Title, search));
        }

        let total = query.clone().count(&self.db).await.map_err(db_err)?;

        let rows = query
            .order_by_desc(category::Column::CreatedAt)
            .order_by_desc(category::Column::Id)
            .offset(page.offset())
            .limit(page.limit)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(Page::new(rows.into_iter().map(Into::into).collect(), total))
    }

    async fn update(&self, id: i64, title: String) -> Result<Category, RepoError> {
        let rows = CategoryEntity::update_many()
            .col_expr(category::Column::Title, Expr::value(title))
            .filter(category::Column::Id.eq(id))
            .exec_with_returning(&self.db)
            .await
            .map_err(db_err)?;

        rows.into_iter()
            .next()
            .map(Into::into)
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn create(&self, comment: NewComment) -> Result<Comment, RepoError> {
        let model = comment::ActiveModel::from(comment)
            .insert(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.into())
    }

    async fn list(
        &self,
        filter: &CommentFilter,
        page: Pagination,
    ) -> Result<Page<Comment>, RepoError> {
        let mut query = CommentEntity::find();
        if let Some(user_id) = filter.user_id {
            query = query.filter(comment::Column::UserId.eq(user_id));
        }
        if let Some(post_id) = filter.post_id {
            query = query.filter(comment::Column::PostId.eq(post_id));
        }

        let total = query.clone().count(&self.db).await.map_err(db_err)?;

        let rows = query
            .order_by_desc(comment::Column::CreatedAt)
            .order_by_desc(comment::Column::Id)
            .offset(page.offset())
            .limit(page.limit)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(Page::new(rows.into_iter().map(Into::into).collect(), total))
    }

    async fn update(&self, id: i64, description: String) -> Result<Comment, RepoError> {
        let now: sea_orm::prelude::DateTimeWithTimeZone = Utc::now().into();

        let rows = CommentEntity::update_many()
            .col_expr(comment::Column::Description, Expr::value(description))
            .col_expr(comment::Column::UpdatedAt, Expr::value(now))
            .filter(comment::Column::Id.eq(id))
            .exec_with_returning(&self.db)
            .await
            .map_err(db_err)?;

        rows.into_iter()
            .next()
            .map(Into::into)
            .ok_or(RepoError::NotFound)
    }
}

#[derive(Debug, FromQueryResult)]
struct LikeCountsRow {
    likes_count: i64,
    dislikes_count: i64,
}

/// One pass of the toggle inside `txn`. `None` means the row disappeared
/// between the conflicting insert and the locking read.
async fn try_toggle(txn: &DatabaseTransaction, vote: NewLike) -> Result<Option<LikeVote>, RepoError> {
    let inserted = LikeEntity::insert(like::ActiveModel::from(vote))
        .on_conflict(
            OnConflict::columns([like::Column::UserId, like::Column::PostId])
                .do_nothing()
                .to_owned(),
        )
        .do_nothing()
        .exec(txn)
        .await
        .map_err(db_err)?;

    if let TryInsertResult::Inserted(result) = inserted {
        return Ok(Some(LikeVote {
            like: Like {
                id: result.last_insert_id,
                user_id: vote.user_id,
                post_id: vote.post_id,
                status: vote.status,
            },
            state: ToggleAction::Insert.resulting_state(vote.status),
        }));
    }

    // The pair already has a row: lock it for the rest of the transaction.
    let Some(existing) = LikeEntity::find()
        .filter(like::Column::UserId.eq(vote.user_id))
        .filter(like::Column::PostId.eq(vote.post_id))
        .lock_exclusive()
        .one(txn)
        .await
        .map_err(db_err)?
    else {
        return Ok(None);
    };

    let action = ToggleAction::decide(Some(existing.status), vote.status);
    if action == ToggleAction::Delete {
        LikeEntity::delete_by_id(existing.id)
            .exec(txn)
            .await
            .map_err(db_err)?;
    } else {
        LikeEntity::update_many()
            .col_expr(like::Column::Status, Expr::value(vote.status))
            .filter(like::Column::Id.eq(existing.id))
            .exec(txn)
            .await
            .map_err(db_err)?;
    }

    Ok(Some(LikeVote {
        like: Like {
            status: vote.status,
            ..Like::from(existing)
        },
        state: action.resulting_state(vote.status),
    }))
}

#[async_trait]
impl LikeRepository for PostgresLikeRepository {
    /// Runs the toggle in one transaction. The unique index on
    /// `(user_id, post_id)` and the row lock serialize concurrent toggles of
    /// the same pair.
    async fn toggle(&self, vote: NewLike) -> Result<LikeVote, RepoError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        for attempt in 1..=TOGGLE_ATTEMPTS {
            if let Some(outcome) = try_toggle(&txn, vote).await? {
                txn.commit().await.map_err(db_err)?;
                return Ok(outcome);
            }
            tracing::debug!(
                user_id = vote.user_id,
                post_id = vote.post_id,
                attempt,
                "Like row removed concurrently, retrying toggle"
            );
        }

        Err(RepoError::Query(format!(
            "like toggle for user {} on post {} did not settle",
            vote.user_id, vote.post_id
        )))
    }

    async fn find(&self, user_id: i64, post_id: i64) -> Result<Option<Like>, RepoError> {
        let result = LikeEntity::find()
            .filter(like::Column::UserId.eq(user_id))
            .filter(like::Column::PostId.eq(post_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.map(Into::into))
    }

    async fn count_for_post(&self, post_id: i64) -> Result<LikeCounts, RepoError> {
        let backend = self.db.get_database_backend();
        let row = LikeCountsRow::find_by_statement(Statement::from_sql_and_values(
            backend,
            r#"SELECT
                COUNT(1) FILTER (WHERE status = true) AS likes_count,
                COUNT(1) FILTER (WHERE status = false) AS dislikes_count
            FROM likes
            WHERE post_id = $1"#,
            [post_id.into()],
        ))
        .one(&self.db)
        .await
        .map_err(db_err)?;

        Ok(row
            .map(|r| LikeCounts {
                likes: r.likes_count,
                dislikes: r.dislikes_count,
            })
            .unwrap_or_default())
    }
}
