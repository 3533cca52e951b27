//! Service behaviour over the in-memory repositories.

use std::collections::HashSet;
use std::sync::Arc;

use blog_core::DomainError;
use blog_core::domain::{NewComment, NewLike, NewPost, PostChanges, UserProfile, VoteState};
use blog_core::services::{
    CategoryService, CommentService, LikeService, ListCommentsParams, ListPostsParams, PostService,
};

use super::*;

fn post_service() -> PostService {
    PostService::new(Arc::new(InMemoryPostRepository::new()))
}

fn like_service() -> LikeService {
    LikeService::new(Arc::new(InMemoryLikeRepository::new()))
}

fn new_post(title: &str, user_id: i64, category_id: i64) -> NewPost {
    NewPost {
        title: title.to_string(),
        description: "Body".to_string(),
        image_url: None,
        user_id,
        category_id,
    }
}

fn profile(id: i64) -> UserProfile {
    UserProfile {
        id,
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: format!("user{}@example.com", id),
        profile_image_url: Some(format!("https://img.example.com/{}.png", id)),
    }
}

#[tokio::test]
async fn create_assigns_id_and_timestamp() {
    let posts = post_service();
    let before = chrono::Utc::now();

    let post = posts.create(new_post("Hi", 7, 1)).await.unwrap();

    assert!(post.id > 0);
    assert!(post.created_at >= before);
    assert_eq!(post.views_count, 0);
    assert!(post.updated_at.is_none());
}

#[tokio::test]
async fn missing_entities_are_not_found() {
    let posts = post_service();
    let categories = CategoryService::new(Arc::new(InMemoryCategoryRepository::new()));
    let comments = CommentService::new(
        Arc::new(InMemoryCommentRepository::new()),
        Arc::new(InMemoryUserDirectory::with_users([profile(3)])),
    );

    assert!(matches!(posts.get(99).await, Err(DomainError::NotFound { .. })));
    assert!(matches!(categories.get(99).await, Err(DomainError::NotFound { .. })));
    assert!(matches!(
        comments.get(99, None).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn every_get_adds_exactly_one_view() {
    let posts = post_service();
    let post = posts.create(new_post("Counted", 7, 1)).await.unwrap();

    let first = posts.get(post.id).await.unwrap();
    let second = posts.get(post.id).await.unwrap();
    let third = posts.get(post.id).await.unwrap();

    assert_eq!(first.views_count, 1);
    assert_eq!(second.views_count, 2);
    assert_eq!(third.views_count, 3);
}

#[tokio::test]
async fn foreign_author_cannot_update_or_delete() {
    let posts = post_service();
    let post = posts.create(new_post("Mine", 7, 1)).await.unwrap();

    let update = posts
        .update(PostChanges {
            id: post.id,
            user_id: 8,
            title: "Hijacked".to_string(),
            description: "nope".to_string(),
            image_url: None,
            category_id: 2,
        })
        .await;
    assert!(matches!(update, Err(DomainError::NotFoundOrNotOwned { .. })));

    let delete = posts.delete(post.id, 8).await;
    assert!(matches!(delete, Err(DomainError::NotFoundOrNotOwned { .. })));

    let unchanged = posts.get(post.id).await.unwrap();
    assert_eq!(unchanged.title, "Mine");
    assert_eq!(unchanged.category_id, 1);
    assert!(unchanged.updated_at.is_none());
}

#[tokio::test]
async fn owner_update_stamps_updated_at() {
    let posts = post_service();
    let post = posts.create(new_post("Draft", 7, 1)).await.unwrap();

    let updated = posts
        .update(PostChanges {
            id: post.id,
            user_id: 7,
            title: "Final".to_string(),
            description: "Done".to_string(),
            image_url: Some("https://img.example.com/cover.png".to_string()),
            category_id: 2,
        })
        .await
        .unwrap();

    assert_eq!(updated.title, "Final");
    assert_eq!(updated.category_id, 2);
    assert!(updated.updated_at.is_some());

    posts.delete(post.id, 7).await.unwrap();
    assert!(matches!(posts.get(post.id).await, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn pages_are_disjoint_and_count_is_total() {
    let posts = post_service();
    for i in 0..15 {
        posts.create(new_post(&format!("Post {}", i), 7, 1)).await.unwrap();
    }

    let params = |page| ListPostsParams {
        page,
        limit: 10,
        ..Default::default()
    };
    let first = posts.list(params(1)).await.unwrap();
    let second = posts.list(params(2)).await.unwrap();

    assert_eq!(first.total, 15);
    assert_eq!(second.total, 15);
    assert_eq!(first.items.len(), 10);
    assert_eq!(second.items.len(), 5);

    let first_ids: HashSet<i64> = first.items.iter().map(|p| p.id).collect();
    assert!(second.items.iter().all(|p| !first_ids.contains(&p.id)));
}

#[tokio::test]
async fn list_filters_and_sorts() {
    let posts = post_service();
    posts.create(new_post("Learning Rust", 7, 1)).await.unwrap();
    posts.create(new_post("rusty tools", 8, 2)).await.unwrap();
    posts.create(new_post("Gardening", 7, 1)).await.unwrap();

    let search = posts
        .list(ListPostsParams {
            search: "RUST".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(search.total, 2);

    let by_user = posts
        .list(ListPostsParams {
            user_id: 7,
            sort_by_date: "asc".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_user.total, 2);
    assert_eq!(by_user.items[0].title, "Learning Rust");

    let newest_first = posts.list(ListPostsParams::default()).await.unwrap();
    assert_eq!(newest_first.items[0].title, "Gardening");

    let bad_sort = posts
        .list(ListPostsParams {
            sort_by_date: "random".to_string(),
            ..Default::default()
        })
        .await;
    assert!(matches!(bad_sort, Err(DomainError::Validation(_))));
}

#[tokio::test]
async fn repeated_like_retracts() {
    let likes = like_service();
    let vote = NewLike {
        user_id: 2,
        post_id: 6,
        status: true,
    };

    let first = likes.create_or_update(vote).await.unwrap();
    assert_eq!(first.state, VoteState::Liked);

    let second = likes.create_or_update(vote).await.unwrap();
    assert_eq!(second.state, VoteState::Absent);

    assert!(matches!(likes.get(2, 6).await, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn opposite_vote_flips_in_place() {
    let likes = like_service();
    let like = NewLike {
        user_id: 2,
        post_id: 6,
        status: true,
    };

    let created = likes.create_or_update(like).await.unwrap();
    let flipped = likes
        .create_or_update(NewLike {
            status: false,
            ..like
        })
        .await
        .unwrap();

    assert_eq!(flipped.state, VoteState::Disliked);
    assert_eq!(flipped.like.id, created.like.id);

    let stored = likes.get(2, 6).await.unwrap();
    assert!(!stored.status);

    let counts = likes.counts(6).await.unwrap();
    assert_eq!((counts.likes, counts.dislikes), (0, 1));
}

#[tokio::test]
async fn counts_likes_and_dislikes_per_post() {
    let likes = like_service();
    for (user_id, status) in [(1, true), (2, true), (3, false)] {
        likes
            .create_or_update(NewLike {
                user_id,
                post_id: 6,
                status,
            })
            .await
            .unwrap();
    }
    likes
        .create_or_update(NewLike {
            user_id: 1,
            post_id: 7,
            status: false,
        })
        .await
        .unwrap();

    let counts = likes.counts(6).await.unwrap();
    assert_eq!((counts.likes, counts.dislikes), (2, 1));
}

#[tokio::test]
async fn category_post_listing_scenario() {
    let categories = CategoryService::new(Arc::new(InMemoryCategoryRepository::new()));
    let posts = post_service();

    let tech = categories.create("Tech".to_string()).await.unwrap();
    categories.create("Travel".to_string()).await.unwrap();
    let post = posts.create(new_post("Hi", 7, tech.id)).await.unwrap();

    let listed = posts
        .list(ListPostsParams {
            category_id: tech.id,
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(listed.total, 1);
    assert_eq!(listed.items[0].id, post.id);
}

#[tokio::test]
async fn comment_snapshot_scenario() {
    let comments = CommentService::new(
        Arc::new(InMemoryCommentRepository::new()),
        Arc::new(InMemoryUserDirectory::with_users([profile(3), profile(4)])),
    );

    let created = comments
        .create(NewComment {
            user_id: 3,
            post_id: 9,
            description: "nice".to_string(),
        })
        .await
        .unwrap();

    let fetched = comments.get(created.comment.id, None).await.unwrap();
    assert_eq!(fetched.comment.description, "nice");
    assert_eq!(fetched.author.unwrap().id, 3);

    let as_viewer = comments.get(created.comment.id, Some(3)).await.unwrap();
    assert_eq!(as_viewer.author.unwrap().id, 3);
}

#[tokio::test]
async fn comment_list_update_and_delete() {
    let comments = CommentService::new(
        Arc::new(InMemoryCommentRepository::new()),
        Arc::new(InMemoryUserDirectory::with_users([profile(3), profile(4)])),
    );
    for (user_id, post_id) in [(3, 9), (4, 9), (3, 10)] {
        comments
            .create(NewComment {
                user_id,
                post_id,
                description: "hello".to_string(),
            })
            .await
            .unwrap();
    }

    let on_post = comments
        .list(ListCommentsParams {
            post_id: 9,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(on_post.total, 2);
    assert!(on_post.items.iter().all(|c| c.author.is_some()));

    let target = on_post.items[0].comment.id;
    let updated = comments
        .update(target, "edited".to_string(), 4)
        .await
        .unwrap();
    assert_eq!(updated.comment.description, "edited");
    assert!(updated.comment.updated_at.is_some());

    comments.delete(target).await.unwrap();
    assert!(matches!(
        comments.delete(target).await,
        Err(DomainError::NotFound { .. })
    ));
}
