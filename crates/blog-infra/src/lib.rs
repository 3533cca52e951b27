//! # Blog Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`.
//! This crate contains the database repositories, in-memory fallbacks and
//! the identity service client.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external database, in-memory only
//! - `postgres` - PostgreSQL repositories via SeaORM

pub mod database;
pub mod identity;
pub mod memory;

// Re-exports - In-Memory
pub use memory::{
    InMemoryCategoryRepository, InMemoryCommentRepository, InMemoryLikeRepository,
    InMemoryPostRepository, InMemoryUserDirectory,
};

// Re-exports - Identity
pub use identity::{HttpUserDirectory, IdentityConfig};

// Re-exports - Postgres
#[cfg(feature = "postgres")]
pub use database::{
    PostgresCategoryRepository, PostgresCommentRepository, PostgresLikeRepository,
    PostgresPostRepository,
};
