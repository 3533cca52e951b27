//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business logic failures surfaced to callers.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} {key}")]
    NotFound { entity_type: &'static str, key: String },

    /// A write scoped to an owner matched nothing: the row is either absent
    /// or belongs to someone else.
    #[error("Entity not found or not owned by caller: {entity_type} with id {id}")]
    NotFoundOrNotOwned { entity_type: &'static str, id: i64 },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(entity_type: &'static str, id: i64) -> Self {
        Self::NotFound {
            entity_type,
            key: format!("with id {}", id),
        }
    }

    /// Not-found for entities addressed by something other than their id.
    pub fn not_found_by(entity_type: &'static str, key: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            key: key.into(),
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,
}
