use async_trait::async_trait;

use crate::domain::{Category, NewCategory, NewPost, NewUser, Post, PostChanges, User};
use crate::error::RepoError;

/// Filter for the public post listing.
#[derive(Debug, Clone)]
pub struct PostFilter {
    /// Rows to skip from the top of the ordered result.
    pub skip: u64,
    /// Maximum rows returned; the HTTP layer clamps this to 1..=100.
    pub limit: u64,
    /// Case-insensitive title substring.
    pub search: Option<String>,
    /// Restrict to a single category.
    pub category_id: Option<i32>,
}

impl Default for PostFilter {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: 10,
            search: None,
            category_id: None,
        }
    }
}

/// User persistence gateway.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepoError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Insert a new user; the store assigns id and creation timestamp.
    async fn insert(&self, user: NewUser) -> Result<User, RepoError>;
}

/// Post persistence gateway.
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;

    /// Published posts only, newest first, `skip`/`limit` applied after the
    /// filters.
    async fn list_published(&self, filter: &PostFilter) -> Result<Vec<Post>, RepoError>;

    /// Insert a new post; the store assigns id and creation timestamp and
    /// enforces slug uniqueness.
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Apply the populated fields of `changes` and bump `updated_at`.
    /// Fails with [`RepoError::NotFound`] when the row is gone.
    async fn update_fields(&self, id: i32, changes: PostChanges) -> Result<Post, RepoError>;

    /// Delete permanently. Fails with [`RepoError::NotFound`] when no row
    /// was removed.
    async fn delete(&self, id: i32) -> Result<(), RepoError>;
}

/// Category persistence gateway.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Category>, RepoError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Category>, RepoError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RepoError>;

    /// Insert a new category; the store enforces name and slug uniqueness.
    async fn insert(&self, category: NewCategory) -> Result<Category, RepoError>;

    /// Delete permanently. Posts referencing the category keep existing;
    /// the store clears their reference.
    async fn delete(&self, id: i32) -> Result<(), RepoError>;
}
