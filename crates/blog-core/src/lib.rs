//! # Blog Core
//!
//! The domain layer of the blog post service: entities, the ports that
//! storage and the identity service must implement, and the services that
//! turn requests into storage operations.
//! This crate has zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::{DomainError, RepoError};
