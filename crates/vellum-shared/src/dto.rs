//! Data Transfer Objects for the HTTP API.
//!
//! Request bodies validate themselves via [`crate::validate`] before any
//! handler logic runs; response bodies are built from domain types and never
//! expose credential material.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use vellum_core::domain::{Category, Post, PostChanges, User};
use vellum_core::ports::PostFilter;
use vellum_core::slug;

use crate::validate::{ValidationError, Validator};

const TITLE_MAX_CHARS: usize = 200;
const NAME_MAX_CHARS: usize = 100;
const SLUG_MAX_CHARS: usize = 100;

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

/// Request to register a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut v = Validator::new();
        let username_charset = self
            .username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !(3..=32).contains(&self.username.chars().count()) || !username_charset {
            v.reject("username", "must be 3-32 characters from a-z, 0-9, '_' or '-'");
        }
        if !looks_like_email(&self.email) {
            v.reject("email", "must be a valid email address");
        }
        if self.password.chars().count() < 8 {
            v.reject("password", "must be at least 8 characters");
        }
        v.finish()
    }
}

/// Request to exchange credentials for a bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Public view of a user. Deliberately omits the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// A freshly issued bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl TokenResponse {
    pub fn bearer(access_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
            expires_in,
        }
    }
}

// ---------------------------------------------------------------------------
// Posts
// ---------------------------------------------------------------------------

/// Request to create a post. The slug is derived from the title server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub category_id: Option<i32>,
}

impl CreatePostRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut v = Validator::new();
        if self.title.trim().is_empty() || self.title.chars().count() > TITLE_MAX_CHARS {
            v.reject("title", "must be 1-200 characters");
        } else if slug::generate(&self.title).is_empty() {
            v.reject("title", "must contain at least one letter or digit");
        }
        if self.content.is_empty() {
            v.reject("content", "must not be empty");
        }
        v.finish()
    }
}

/// Partial post update. Omitted fields keep their current value; an explicit
/// `"category_id": null` clears the category. The slug never changes after
/// creation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub published: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub category_id: Option<Option<i32>>,
}

impl UpdatePostRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut v = Validator::new();
        if let Some(title) = &self.title {
            if title.trim().is_empty() || title.chars().count() > TITLE_MAX_CHARS {
                v.reject("title", "must be 1-200 characters");
            }
        }
        if let Some(content) = &self.content {
            if content.is_empty() {
                v.reject("content", "must not be empty");
            }
        }
        v.finish()
    }

    pub fn into_changes(self) -> PostChanges {
        PostChanges {
            title: self.title,
            content: self.content,
            published: self.published,
            category_id: self.category_id,
        }
    }
}

/// Keeps "field absent" (`None`) distinct from "field set to null"
/// (`Some(None)`) when deserializing a patch body.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Post as returned to clients, with the related category embedded when one
/// is assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub published: bool,
    pub author_id: i32,
    pub category_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub category: Option<CategoryResponse>,
}

impl PostResponse {
    /// Build from a domain post and its explicitly loaded category.
    pub fn from_parts(post: Post, category: Option<Category>) -> Self {
        Self {
            id: post.id,
            title: post.title,
            slug: post.slug,
            content: post.content,
            published: post.published,
            author_id: post.author_id,
            category_id: post.category_id,
            created_at: post.created_at,
            updated_at: post.updated_at,
            category: category.map(CategoryResponse::from),
        }
    }
}

/// Query parameters accepted by the post listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostQuery {
    pub skip: Option<u64>,
    pub limit: Option<u64>,
    pub search: Option<String>,
    pub category_id: Option<i32>,
}

impl PostQuery {
    /// Validate ranges and produce the repository filter. `limit` must fall
    /// in 1..=100 and defaults to 10; an empty `search` string is treated as
    /// no search.
    pub fn into_filter(self) -> Result<PostFilter, ValidationError> {
        let mut v = Validator::new();
        let limit = self.limit.unwrap_or(10);
        if !(1..=100).contains(&limit) {
            v.reject("limit", "must be between 1 and 100");
        }
        v.finish()?;
        Ok(PostFilter {
            skip: self.skip.unwrap_or(0),
            limit,
            search: self.search.filter(|s| !s.is_empty()),
            category_id: self.category_id,
        })
    }
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// Request to create a category. Unlike posts, the caller supplies the slug.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub slug: String,
}

impl CreateCategoryRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut v = Validator::new();
        if self.name.trim().is_empty() || self.name.chars().count() > NAME_MAX_CHARS {
            v.reject("name", "must be 1-100 characters");
        }
        if self.slug.chars().count() > SLUG_MAX_CHARS || !slug::is_canonical(&self.slug) {
            v.reject("slug", "must be a lower-case hyphenated slug");
        }
        v.finish()
    }
}

/// Public view of a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            slug: category.slug,
            created_at: category.created_at,
        }
    }
}

fn looks_like_email(s: &str) -> bool {
    match s.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_accepts_valid_input() {
        let req = RegisterRequest {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "correct-horse".to_string(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_register_request_lists_every_bad_field() {
        let req = RegisterRequest {
            username: "a".to_string(),
            email: "not-an-email".to_string(),
            password: "short".to_string(),
        };
        let err = req.validate().unwrap_err();
        let fields: Vec<&str> = err.errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["username", "email", "password"]);
    }

    #[test]
    fn test_create_post_rejects_symbol_only_title() {
        let req = CreatePostRequest {
            title: "!!!".to_string(),
            content: "body".to_string(),
            published: false,
            category_id: None,
        };
        let err = req.validate().unwrap_err();
        assert_eq!(err.errors[0].field, "title");
    }

    #[test]
    fn test_create_post_rejects_overlong_title() {
        let req = CreatePostRequest {
            title: "a".repeat(201),
            content: "body".to_string(),
            published: false,
            category_id: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_request_distinguishes_absent_from_null() {
        let absent: UpdatePostRequest = serde_json::from_str(r#"{"title": "New"}"#).unwrap();
        assert_eq!(absent.category_id, None);

        let cleared: UpdatePostRequest =
            serde_json::from_str(r#"{"category_id": null}"#).unwrap();
        assert_eq!(cleared.category_id, Some(None));

        let assigned: UpdatePostRequest =
            serde_json::from_str(r#"{"category_id": 3}"#).unwrap();
        assert_eq!(assigned.category_id, Some(Some(3)));
    }

    #[test]
    fn test_post_query_defaults() {
        let filter = PostQuery::default().into_filter().unwrap();
        assert_eq!(filter.skip, 0);
        assert_eq!(filter.limit, 10);
        assert_eq!(filter.search, None);
        assert_eq!(filter.category_id, None);
    }

    #[test]
    fn test_post_query_rejects_out_of_range_limit() {
        for limit in [0, 101] {
            let query = PostQuery {
                limit: Some(limit),
                ..Default::default()
            };
            let err = query.into_filter().unwrap_err();
            assert_eq!(err.errors[0].field, "limit");
        }
    }

    #[test]
    fn test_post_query_drops_empty_search() {
        let query = PostQuery {
            search: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(query.into_filter().unwrap().search, None);
    }

    #[test]
    fn test_category_request_requires_canonical_slug() {
        let req = CreateCategoryRequest {
            name: "Tech".to_string(),
            slug: "Tech Stuff".to_string(),
        };
        let err = req.validate().unwrap_err();
        assert_eq!(err.errors[0].field, "slug");

        let ok = CreateCategoryRequest {
            name: "Tech".to_string(),
            slug: "tech-stuff".to_string(),
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_user_response_excludes_hash() {
        let user = User {
            id: 1,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "$argon2id$...".to_string(),
            created_at: Utc::now(),
        };
        let body = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert!(body.get("password_hash").is_none());
        assert_eq!(body["username"], "alice");
    }
}
