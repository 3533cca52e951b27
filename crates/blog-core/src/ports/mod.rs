//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod identity;
mod repository;

pub use identity::{IdentityError, UserDirectory};
pub use repository::{
    BaseRepository, CategoryRepository, CommentRepository, LikeRepository, PostRepository,
};
