//! # Vellum Shared
//!
//! Request and response types for the HTTP surface: DTOs, explicit input
//! validation with per-field reporting, and RFC 7807 problem bodies.

pub mod dto;
pub mod response;
pub mod validate;

pub use response::ErrorResponse;
pub use validate::{FieldError, ValidationError};
