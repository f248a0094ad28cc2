//! Service layer for business logic
//!
//! Shared by the HTTP handlers; the CLI talks to the service over HTTP.

pub mod auth;
pub mod shorten;
pub mod token;

pub use auth::AuthGuard;
pub use shorten::{CollisionPolicy, ShortenService};
pub use token::{TokenGenerator, generate_token};
