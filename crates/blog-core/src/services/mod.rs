//! Services - request shaping, validation and error classification on top
//! of the ports. One service per entity; dependencies are injected at
//! construction so any port implementation can be substituted.

mod category;
mod comment;
mod like;
mod post;

pub use category::{CategoryService, ListCategoriesParams};
pub use comment::{CommentService, ListCommentsParams};
pub use like::LikeService;
pub use post::{ListPostsParams, PostService};

use std::fmt::Display;

use crate::error::DomainError;

/// Log a storage or dependency failure and turn it into an internal error.
fn internal(context: &str, err: impl Display) -> DomainError {
    tracing::error!(error = %err, "{}", context);
    DomainError::Internal(format!("{}: {}", context, err))
}

fn require_text(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{} must not be empty", field)));
    }
    Ok(())
}

fn require_id(field: &str, value: i64) -> Result<(), DomainError> {
    if value <= 0 {
        return Err(DomainError::Validation(format!(
            "{} must be a positive id",
            field
        )));
    }
    Ok(())
}

/// Zero means "no filter" on the wire.
fn non_zero(id: i64) -> Option<i64> {
    (id != 0).then_some(id)
}

/// Empty means "absent" on the wire.
fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
