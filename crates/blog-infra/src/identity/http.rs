//! HTTP client for the identity service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use blog_core::domain::UserProfile;
use blog_core::ports::{IdentityError, UserDirectory};

/// Identity service connection configuration.
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// Base URL (e.g., http://localhost:8001)
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8001".to_string(),
            timeout: Duration::from_secs(5),
        }
    }
}

/// Wire shape of a user returned by `GET /api/users/{id}`.
#[derive(Debug, Deserialize)]
struct UserPayload {
    id: i64,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    profile_image_url: Option<String>,
}

impl From<UserPayload> for UserProfile {
    fn from(payload: UserPayload) -> Self {
        Self {
            id: payload.id,
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email,
            profile_image_url: payload.profile_image_url.filter(|url| !url.is_empty()),
        }
    }
}

/// User directory backed by the identity service.
///
/// Holds one pooled client shared by all requests; no caching, no retries.
pub struct HttpUserDirectory {
    base_url: String,
    client: Client,
}

impl HttpUserDirectory {
    pub fn new(config: IdentityConfig) -> Result<Self, IdentityError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| IdentityError::Unavailable(e.to_string()))?;

        tracing::info!(url = %config.base_url, "Identity service client configured");

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn user_url(&self, id: i64) -> String {
        format!("{}/api/users/{}", self.base_url, id)
    }
}

fn decode_user(body: &[u8]) -> Result<UserProfile, IdentityError> {
    serde_json::from_slice::<UserPayload>(body)
        .map(Into::into)
        .map_err(|e| IdentityError::InvalidResponse(e.to_string()))
}

#[async_trait]
impl UserDirectory for HttpUserDirectory {
    async fn get_user(&self, id: i64) -> Result<UserProfile, IdentityError> {
        tracing::debug!(user_id = id, "Resolving user from identity service");

        let response = self
            .client
            .get(self.user_url(id))
            .send()
            .await
            .map_err(|e| IdentityError::Unavailable(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => return Err(IdentityError::NotFound(id)),
            status if !status.is_success() => {
                return Err(IdentityError::Unavailable(format!(
                    "identity service answered {}",
                    status
                )));
            }
            _ => {}
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| IdentityError::Unavailable(e.to_string()))?;

        decode_user(&body)
    }
}
