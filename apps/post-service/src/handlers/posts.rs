//! Post endpoints.

use actix_web::{HttpResponse, web};
use blog_core::domain::{NewPost, Post, PostChanges};
use blog_core::services::ListPostsParams;
use blog_shared::dto::{
    CreatePostRequest, ListPostsQuery, OwnerQuery, PostListResponse, PostResponse,
    UpdatePostRequest,
};

use crate::middleware::error::AppResult;
use crate::state::AppState;

fn post_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        description: post.description,
        image_url: post.image_url,
        user_id: post.user_id,
        category_id: post.category_id,
        created_at: post.created_at.to_rfc3339(),
        updated_at: post.updated_at.map(|t| t.to_rfc3339()),
        views_count: post.views_count,
    }
}

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let body = body.into_inner();
    let post = state
        .posts
        .create(NewPost {
            title: body.title,
            description: body.description,
            image_url: body.image_url,
            user_id: body.user_id,
            category_id: body.category_id,
        })
        .await?;

    Ok(HttpResponse::Created().json(post_response(post)))
}

/// GET /api/posts/{id}
///
/// Every successful read counts as a view.
pub async fn get(state: web::Data<AppState>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    let post = state.posts.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// GET /api/posts
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let page = state
        .posts
        .list(ListPostsParams {
            page: query.page,
            limit: query.limit,
            search: query.search,
            category_id: query.category_id,
            user_id: query.user_id,
            sort_by_date: query.sort_by_date,
        })
        .await?;

    Ok(HttpResponse::Ok().json(PostListResponse {
        posts: page.items.into_iter().map(post_response).collect(),
        count: page.total,
    }))
}

/// PUT /api/posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let body = body.into_inner();
    let post = state
        .posts
        .update(PostChanges {
            id: path.into_inner(),
            user_id: body.user_id,
            title: body.title,
            description: body.description,
            image_url: body.image_url,
            category_id: body.category_id,
        })
        .await?;

    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// DELETE /api/posts/{id}?user_id=
pub async fn delete(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    owner: web::Query<OwnerQuery>,
) -> AppResult<HttpResponse> {
    state.posts.delete(path.into_inner(), owner.user_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
