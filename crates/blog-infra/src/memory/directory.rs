//! In-memory user directory.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use blog_core::domain::UserProfile;
use blog_core::ports::{IdentityError, UserDirectory};

/// User directory backed by a map. Starts empty unless seeded.
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<i64, UserProfile>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_users(users: impl IntoIterator<Item = UserProfile>) -> Self {
        Self {
            users: RwLock::new(users.into_iter().map(|u| (u.id, u)).collect()),
        }
    }

    pub async fn insert(&self, user: UserProfile) {
        self.users.write().await.insert(user.id, user);
    }
}

impl Default for InMemoryUserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn get_user(&self, id: i64) -> Result<UserProfile, IdentityError> {
        self.users
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(IdentityError::NotFound(id))
    }
}
