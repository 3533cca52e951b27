//! Identity service port - resolves user ids to public profiles.

use async_trait::async_trait;

use crate::domain::UserProfile;

/// Directory of users owned by the external identity service.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Fetch the current profile of `id`.
    async fn get_user(&self, id: i64) -> Result<UserProfile, IdentityError>;
}

/// Identity lookup errors.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("User {0} not found")]
    NotFound(i64),

    #[error("Identity service unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid identity service response: {0}")]
    InvalidResponse(String),
}
