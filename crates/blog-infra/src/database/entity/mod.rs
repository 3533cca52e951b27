//! SeaORM entities, one per table.

pub mod category;
pub mod comment;
pub mod like;
pub mod post;
