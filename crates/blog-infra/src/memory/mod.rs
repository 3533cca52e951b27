//! In-memory implementations - used when no database or identity service
//! is configured, and in tests.
//!
//! Note: Data is lost on process restart.

mod directory;
mod repository;

pub use directory::InMemoryUserDirectory;
pub use repository::{
    InMemoryCategoryRepository, InMemoryCommentRepository, InMemoryLikeRepository,
    InMemoryPostRepository,
};

#[cfg(test)]
mod tests;
