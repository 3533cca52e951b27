//! Identity service clients.

mod http;

pub use http::{HttpUserDirectory, IdentityConfig};
