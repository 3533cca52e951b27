//! Comment endpoints. Responses embed a snapshot of the commenter.

use actix_web::{HttpResponse, web};
use blog_core::domain::{CommentWithAuthor, NewComment, UserProfile};
use blog_core::services::ListCommentsParams;
use blog_shared::dto::{
    CommentListResponse, CommentResponse, CommentUserResponse, CreateCommentRequest,
    GetCommentQuery, ListCommentsQuery, UpdateCommentRequest,
};

use crate::middleware::error::AppResult;
use crate::state::AppState;

fn user_response(user: UserProfile) -> CommentUserResponse {
    CommentUserResponse {
        id: user.id,
        first_name: user.first_name,
        last_name: user.last_name,
        email: user.email,
        profile_image: user.profile_image_url,
    }
}

fn comment_response(entry: CommentWithAuthor) -> CommentResponse {
    let CommentWithAuthor { comment, author } = entry;
    CommentResponse {
        id: comment.id,
        user_id: comment.user_id,
        post_id: comment.post_id,
        description: comment.description,
        created_at: comment.created_at.to_rfc3339(),
        updated_at: comment.updated_at.map(|t| t.to_rfc3339()),
        user: author.map(user_response),
    }
}

pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<CreateCommentRequest>,
) -> AppResult<HttpResponse> {
    let body = body.into_inner();
    let comment = state
        .comments
        .create(NewComment {
            user_id: body.user_id,
            post_id: body.post_id,
            description: body.description,
        })
        .await?;

    Ok(HttpResponse::Created().json(comment_response(comment)))
}

/// GET /api/comments/{id}?user_id=
pub async fn get(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    query: web::Query<GetCommentQuery>,
) -> AppResult<HttpResponse> {
    let comment = state.comments.get(path.into_inner(), query.user_id).await?;
    Ok(HttpResponse::Ok().json(comment_response(comment)))
}

pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<ListCommentsQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let page = state
        .comments
        .list(ListCommentsParams {
            page: query.page,
            limit: query.limit,
            user_id: query.user_id,
            post_id: query.post_id,
        })
        .await?;

    Ok(HttpResponse::Ok().json(CommentListResponse {
        comments: page.items.into_iter().map(comment_response).collect(),
        count: page.total,
    }))
}

pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<UpdateCommentRequest>,
) -> AppResult<HttpResponse> {
    let body = body.into_inner();
    let comment = state
        .comments
        .update(path.into_inner(), body.description, body.user_id)
        .await?;
    Ok(HttpResponse::Ok().json(comment_response(comment)))
}

pub async fn delete(state: web::Data<AppState>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    state.comments.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
