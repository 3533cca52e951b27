use serde::{Deserialize, Serialize};

/// Public profile of a user, as served by the identity service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub profile_image_url: Option<String>,
}
