use std::sync::Arc;

use crate::domain::{Like, LikeCounts, LikeVote, NewLike};
use crate::error::DomainError;
use crate::ports::LikeRepository;

use super::{internal, require_id};

/// Like/dislike operations.
pub struct LikeService {
    repo: Arc<dyn LikeRepository>,
}

impl LikeService {
    pub fn new(repo: Arc<dyn LikeRepository>) -> Self {
        Self { repo }
    }

    /// Cast, flip or retract a vote according to the toggle rule.
    pub async fn create_or_update(&self, vote: NewLike) -> Result<LikeVote, DomainError> {
        require_id("user_id", vote.user_id)?;
        require_id("post_id", vote.post_id)?;

        let outcome = self
            .repo
            .toggle(vote)
            .await
            .map_err(|e| internal("failed to create-update like", e))?;

        tracing::debug!(
            user_id = vote.user_id,
            post_id = vote.post_id,
            state = ?outcome.state,
            "Vote toggled"
        );
        Ok(outcome)
    }

    pub async fn get(&self, user_id: i64, post_id: i64) -> Result<Like, DomainError> {
        self.repo
            .find(user_id, post_id)
            .await
            .map_err(|e| internal("failed to get like", e))?
            .ok_or_else(|| {
                DomainError::not_found_by(
                    "like",
                    format!("for user {} on post {}", user_id, post_id),
                )
            })
    }

    pub async fn counts(&self, post_id: i64) -> Result<LikeCounts, DomainError> {
        self.repo
            .count_for_post(post_id)
            .await
            .map_err(|e| internal("failed to get likes and dislikes count", e))
    }
}
