//! # Vellum Core
//!
//! The domain layer of the Vellum blog backend.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ownership;
pub mod ports;
pub mod slug;

pub use error::DomainError;
