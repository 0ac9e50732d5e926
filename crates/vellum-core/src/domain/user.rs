use chrono::{DateTime, Utc};

/// User entity - an account able to author posts.
///
/// Deliberately not serializable: the stored password hash must never travel
/// to a client. Responses are built from `UserResponse` instead.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable user record. The id and creation timestamp are assigned by the
/// persistence gateway.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}
