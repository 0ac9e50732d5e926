//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod repository;

pub use auth::{AuthError, IssuedToken, PasswordService, TokenClaims, TokenService};
pub use repository::{CategoryRepository, PostFilter, PostRepository, UserRepository};
