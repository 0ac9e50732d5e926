//! # Vellum Infrastructure
//!
//! Concrete implementations of the ports defined in `vellum-core`: SeaORM
//! repositories over PostgreSQL, in-memory repositories for running without
//! a database, and the JWT / Argon2 authentication services.

pub mod auth;
pub mod database;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use database::{DatabaseConfig, connect};
