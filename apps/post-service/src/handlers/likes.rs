//! Like endpoints.

use actix_web::{HttpResponse, web};
use blog_core::domain::{Like, NewLike, VoteState};
use blog_shared::dto::{LikeCountQuery, LikeCountsResponse, LikeQuery, LikeRequest, LikeResponse};

use crate::middleware::error::AppResult;
use crate::state::AppState;

fn like_response(like: Like, state: Option<VoteState>) -> LikeResponse {
    LikeResponse {
        id: like.id,
        user_id: like.user_id,
        post_id: like.post_id,
        status: like.status,
        state,
    }
}

/// POST /api/likes
///
/// Toggles: a new vote is recorded, a repeated vote is retracted and an
/// opposite vote flips the stored one.
pub async fn vote(
    state: web::Data<AppState>,
    body: web::Json<LikeRequest>,
) -> AppResult<HttpResponse> {
    let body = body.into_inner();
    let vote = state
        .likes
        .create_or_update(NewLike {
            user_id: body.user_id,
            post_id: body.post_id,
            status: body.status,
        })
        .await?;

    Ok(HttpResponse::Ok().json(like_response(vote.like, Some(vote.state))))
}

/// GET /api/likes?user_id=&post_id=
pub async fn get(
    state: web::Data<AppState>,
    query: web::Query<LikeQuery>,
) -> AppResult<HttpResponse> {
    let like = state.likes.get(query.user_id, query.post_id).await?;
    Ok(HttpResponse::Ok().json(like_response(like, None)))
}

/// GET /api/likes/count?post_id=
pub async fn count(
    state: web::Data<AppState>,
    query: web::Query<LikeCountQuery>,
) -> AppResult<HttpResponse> {
    let counts = state.likes.counts(query.post_id).await?;
    Ok(HttpResponse::Ok().json(LikeCountsResponse {
        likes_count: counts.likes,
        dislikes_count: counts.dislikes,
    }))
}
