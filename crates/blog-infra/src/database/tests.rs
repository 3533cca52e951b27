#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::database::entity::{category, like, post};
    use crate::database::postgres_repo::{
        PostgresCategoryRepository, PostgresLikeRepository, PostgresPostRepository,
        like_pattern,
    };
    use blog_core::domain::{Category, NewLike, Pagination, PostFilter, VoteState};
    use blog_core::error::RepoError;
    use blog_core::ports::{BaseRepository, LikeRepository, PostRepository};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};

    fn post_model(id: i64, views_count: i32) -> post::Model {
        post::Model {
            id,
            title: "Test Post".to_owned(),
            description: "Content".to_owned(),
            image_url: None,
            user_id: 7,
            category_id: 1,
            created_at: chrono::Utc::now().into(),
            updated_at: None,
            views_count,
        }
    }

    #[tokio::test]
    async fn test_find_category_by_id() {
        let now = chrono::Utc::now();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![category::Model {
                id: 4,
                title: "Tech".to_owned(),
                created_at: now.into(),
            }]])
            .into_connection();

        let repo = PostgresCategoryRepository::new(db);

        let result: Option<Category> = repo.find_by_id(4).await.unwrap();

        let category = result.unwrap();
        assert_eq!(category.id, 4);
        assert_eq!(category.title, "Tech");
    }

    #[tokio::test]
    async fn test_record_view_returns_updated_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![post_model(9, 3)]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let post = repo.record_view(9).await.unwrap();
        assert_eq!(post.id, 9);
        assert_eq!(post.views_count, 3);
        assert!(post.updated_at.is_none());
    }

    #[tokio::test]
    async fn test_record_view_missing_post_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<post::Model>::new()])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        assert!(matches!(repo.record_view(404).await, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_foreign_post_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        assert!(matches!(
            repo.delete_owned(9, 8).await,
            Err(RepoError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_list_posts_reports_filtered_total() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[BTreeMap::from([("num_items", Value::from(12i64))])]])
            .append_query_results([vec![post_model(12, 0), post_model(11, 0)]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let page = repo
            .list(&PostFilter::default(), Pagination::new(1, 2))
            .await
            .unwrap();

        assert_eq!(page.total, 12);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].id, 12);
    }

    #[tokio::test]
    async fn test_count_likes_and_dislikes() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[BTreeMap::from([
                ("likes_count", Value::from(2i64)),
                ("dislikes_count", Value::from(1i64)),
            ])]])
            .into_connection();

        let repo = PostgresLikeRepository::new(db);

        let counts = repo.count_for_post(6).await.unwrap();
        assert_eq!((counts.likes, counts.dislikes), (2, 1));
    }

    fn like_model(id: i64, status: bool) -> like::Model {
        like::Model {
            id,
            user_id: 3,
            post_id: 6,
            status,
        }
    }

    fn vote(status: bool) -> NewLike {
        NewLike {
            user_id: 3,
            post_id: 6,
            status,
        }
    }

    fn one_row_affected() -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }
    }

    #[tokio::test]
    async fn test_toggle_inserts_first_vote() {
        // The insert returns the new id; no conflict.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![like_model(21, false)]])
            .into_connection();

        let repo = PostgresLikeRepository::new(db);

        let outcome = repo.toggle(vote(false)).await.unwrap();
        assert_eq!(outcome.state, VoteState::Disliked);
        assert_eq!(outcome.like.id, 21);
        assert!(!outcome.like.status);
    }

    #[tokio::test]
    async fn test_toggle_same_vote_retracts() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<like::Model>::new()])
            .append_query_results([vec![like_model(8, true)]])
            .append_exec_results([one_row_affected()])
            .into_connection();

        let repo = PostgresLikeRepository::new(db);

        let outcome = repo.toggle(vote(true)).await.unwrap();
        assert_eq!(outcome.state, VoteState::Absent);
        assert_eq!(outcome.like.id, 8);
    }

    #[tokio::test]
    async fn test_toggle_opposite_vote_flips_in_place() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<like::Model>::new()])
            .append_query_results([vec![like_model(8, true)]])
            .append_exec_results([one_row_affected()])
            .into_connection();

        let repo = PostgresLikeRepository::new(db);

        let outcome = repo.toggle(vote(false)).await.unwrap();
        assert_eq!(outcome.state, VoteState::Disliked);
        assert_eq!(outcome.like.id, 8);
        assert!(!outcome.like.status);
    }

    #[tokio::test]
    async fn test_toggle_gives_up_when_row_keeps_vanishing() {
        // Every attempt conflicts on insert, then finds no row to lock.
        let empty = || Vec::<like::Model>::new();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([empty(), empty(), empty(), empty(), empty(), empty()])
            .into_connection();

        let repo = PostgresLikeRepository::new(db);

        assert!(matches!(
            repo.toggle(vote(true)).await,
            Err(RepoError::Query(_))
        ));
    }

    #[test]
    fn test_like_pattern_matches_literally() {
        assert_eq!(like_pattern("Rust"), "%rust%");
        assert_eq!(like_pattern("100%_off"), "%100\\%\\_off%");
    }
}
