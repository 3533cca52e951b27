//! # Blog Shared
//!
//! Wire types shared by the service and its clients.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
