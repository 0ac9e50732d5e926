//! Application error type - RFC 7807 compliant responses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use std::fmt;

use vellum_core::DomainError;
use vellum_core::error::RepoError;
use vellum_core::ports::AuthError;
use vellum_shared::{ErrorResponse, ValidationError};

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Unauthorized,
    Forbidden,
    DuplicateSlug(String),
    DuplicateName(String),
    Internal(String),
    Validation(ValidationError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Unauthorized => write!(f, "Unauthorized"),
            AppError::Forbidden => write!(f, "Forbidden"),
            AppError::DuplicateSlug(slug) => write!(f, "Duplicate slug: {}", slug),
            AppError::DuplicateName(name) => write!(f, "Duplicate name: {}", name),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
            AppError::Validation(err) => write!(f, "Validation errors: {}", err.summary()),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::DuplicateSlug(_) => StatusCode::BAD_REQUEST,
            AppError::DuplicateName(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Unauthorized => ErrorResponse::unauthorized(),
            AppError::Forbidden => ErrorResponse::forbidden()
                .with_detail("Only the author may modify this resource."),
            AppError::DuplicateSlug(slug) => ErrorResponse::new(400, "Duplicate Slug")
                .with_detail(format!("slug '{}' is already in use", slug)),
            AppError::DuplicateName(name) => ErrorResponse::new(400, "Duplicate Name")
                .with_detail(format!("name '{}' is already in use", name)),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
            AppError::Validation(err) => ErrorResponse::new(422, "Validation Failed")
                .with_detail(err.summary())
                .with_errors(err.errors.clone()),
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity } => AppError::NotFound(format!("{} not found", entity)),
            DomainError::DuplicateSlug(slug) => AppError::DuplicateSlug(slug),
            DomainError::DuplicateName(name) => AppError::DuplicateName(name),
            DomainError::Forbidden => AppError::Forbidden,
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("resource not found".to_string()),
            // A lost uniqueness race surfaces here; same response as the
            // handler's advisory pre-check.
            RepoError::Constraint(msg) => AppError::BadRequest(msg),
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::HashingError(msg) => AppError::Internal(msg),
            _ => AppError::Unauthorized,
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err)
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
