//! Authentication and authorization ports.

use chrono::{DateTime, Utc};

/// A freshly signed bearer token together with its expiry instant.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Claims recovered from a validated token.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub user_id: i32,
    pub exp: i64,
}

/// Token service - signs and validates bearer tokens.
pub trait TokenService: Send + Sync {
    /// Sign a token for `user_id` expiring after the configured lifetime.
    fn issue_token(&self, user_id: i32) -> Result<IssuedToken, AuthError>;

    /// Verify signature and expiry, yielding the caller's identity.
    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError>;

    /// Configured token lifetime in seconds.
    fn lifetime_seconds(&self) -> i64;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password with a fresh random salt.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a stored hash. The plaintext and the hash
    /// must never be logged or echoed back.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("token expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("missing authorization header")]
    MissingAuth,

    #[error("hashing error: {0}")]
    HashingError(String),
}
