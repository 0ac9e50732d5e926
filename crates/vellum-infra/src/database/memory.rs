//! In-memory repository implementations - used when no database is
//! configured and by the end-to-end tests.
//!
//! All three repositories share one [`InMemoryStore`] so cross-table
//! behavior (clearing category references on delete) matches the foreign
//! keys the migration defines. Data is lost on process restart.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use vellum_core::domain::{Category, NewCategory, NewPost, NewUser, Post, PostChanges, User};
use vellum_core::error::RepoError;
use vellum_core::ports::{CategoryRepository, PostFilter, PostRepository, UserRepository};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<i32, User>,
    posts: HashMap<i32, Post>,
    categories: HashMap<i32, Category>,
    next_user_id: i32,
    next_post_id: i32,
    next_category_id: i32,
}

/// Shared backing store for the in-memory repositories.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// In-memory user repository.
pub struct InMemoryUserRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryUserRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<User, RepoError> {
        let mut tables = self.store.tables.write().await;

        if tables.users.values().any(|u| u.username == user.username) {
            return Err(RepoError::Constraint("username already exists".to_string()));
        }
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(RepoError::Constraint("email already exists".to_string()));
        }

        tables.next_user_id += 1;
        let row = User {
            id: tables.next_user_id,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        tables.users.insert(row.id, row.clone());

        Ok(row)
    }
}

/// In-memory post repository.
pub struct InMemoryPostRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryPostRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.posts.get(&id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.posts.values().find(|p| p.slug == slug).cloned())
    }

    async fn list_published(&self, filter: &PostFilter) -> Result<Vec<Post>, RepoError> {
        let tables = self.store.tables.read().await;
        let search = filter.search.as_ref().map(|s| s.to_lowercase());

        let mut posts: Vec<Post> = tables
            .posts
            .values()
            .filter(|p| p.published)
            .filter(|p| match &search {
                Some(needle) => p.title.to_lowercase().contains(needle),
                None => true,
            })
            .filter(|p| match filter.category_id {
                Some(id) => p.category_id == Some(id),
                None => true,
            })
            .cloned()
            .collect();

        // Newest first, with the id as tie-breaker for same-instant rows.
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(posts
            .into_iter()
            .skip(filter.skip as usize)
            .take(filter.limit as usize)
            .collect())
    }

    async fn insert(&self, post: NewPost) -> Result<Post, RepoError> {
        let mut tables = self.store.tables.write().await;

        if tables.posts.values().any(|p| p.slug == post.slug) {
            return Err(RepoError::Constraint("slug already exists".to_string()));
        }

        tables.next_post_id += 1;
        let row = Post {
            id: tables.next_post_id,
            title: post.title,
            slug: post.slug,
            content: post.content,
            published: post.published,
            author_id: post.author_id,
            category_id: post.category_id,
            created_at: Utc::now(),
            updated_at: None,
        };
        tables.posts.insert(row.id, row.clone());

        Ok(row)
    }

    async fn update_fields(&self, id: i32, changes: PostChanges) -> Result<Post, RepoError> {
        let mut tables = self.store.tables.write().await;
        let post = tables.posts.get_mut(&id).ok_or(RepoError::NotFound)?;

        if let Some(title) = changes.title {
            post.title = title;
        }
        if let Some(content) = changes.content {
            post.content = content;
        }
        if let Some(published) = changes.published {
            post.published = published;
        }
        if let Some(category_id) = changes.category_id {
            post.category_id = category_id;
        }
        post.updated_at = Some(Utc::now());

        Ok(post.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut tables = self.store.tables.write().await;
        tables.posts.remove(&id).ok_or(RepoError::NotFound)?;
        Ok(())
    }
}

/// In-memory category repository.
pub struct InMemoryCategoryRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryCategoryRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>, RepoError> {
        let tables = self.store.tables.read().await;
        let mut categories: Vec<Category> = tables.categories.values().cloned().collect();
        categories.sort_by_key(|c| c.id);
        Ok(categories)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Category>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.categories.get(&id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.categories.values().find(|c| c.slug == slug).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.categories.values().find(|c| c.name == name).cloned())
    }

    async fn insert(&self, category: NewCategory) -> Result<Category, RepoError> {
        let mut tables = self.store.tables.write().await;

        if tables.categories.values().any(|c| c.name == category.name) {
            return Err(RepoError::Constraint("name already exists".to_string()));
        }
        if tables.categories.values().any(|c| c.slug == category.slug) {
            return Err(RepoError::Constraint("slug already exists".to_string()));
        }

        tables.next_category_id += 1;
        let row = Category {
            id: tables.next_category_id,
            name: category.name,
            slug: category.slug,
            created_at: Utc::now(),
        };
        tables.categories.insert(row.id, row.clone());

        Ok(row)
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut tables = self.store.tables.write().await;
        tables.categories.remove(&id).ok_or(RepoError::NotFound)?;

        // Same behavior as the ON DELETE SET NULL foreign key.
        for post in tables.posts.values_mut() {
            if post.category_id == Some(id) {
                post.category_id = None;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repos() -> (
        InMemoryUserRepository,
        InMemoryPostRepository,
        InMemoryCategoryRepository,
    ) {
        let store = Arc::new(InMemoryStore::new());
        (
            InMemoryUserRepository::new(store.clone()),
            InMemoryPostRepository::new(store.clone()),
            InMemoryCategoryRepository::new(store),
        )
    }

    fn new_post(title: &str, slug: &str, published: bool) -> NewPost {
        NewPost {
            title: title.to_string(),
            slug: slug.to_string(),
            content: "content".to_string(),
            published,
            author_id: 1,
            category_id: None,
        }
    }

    #[tokio::test]
    async fn test_user_ids_are_sequential() {
        let (users, _, _) = repos();

        let first = users
            .insert(NewUser {
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap();
        let second = users
            .insert(NewUser {
                username: "bob".to_string(),
                email: "bob@example.com".to_string(),
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_duplicate_username_is_rejected() {
        let (users, _, _) = repos();

        users
            .insert(NewUser {
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap();

        let result = users
            .insert(NewUser {
                username: "alice".to_string(),
                email: "other@example.com".to_string(),
                password_hash: "hash".to_string(),
            })
            .await;

        assert!(matches!(result.unwrap_err(), RepoError::Constraint(_)));
    }

    #[tokio::test]
    async fn test_duplicate_post_slug_is_rejected() {
        let (_, posts, _) = repos();

        posts.insert(new_post("First", "first", true)).await.unwrap();
        let result = posts.insert(new_post("First again", "first", true)).await;

        assert!(matches!(result.unwrap_err(), RepoError::Constraint(_)));
    }

    #[tokio::test]
    async fn test_list_hides_unpublished_and_orders_newest_first() {
        let (_, posts, _) = repos();

        posts.insert(new_post("Oldest", "oldest", true)).await.unwrap();
        posts.insert(new_post("Draft", "draft", false)).await.unwrap();
        posts.insert(new_post("Newest", "newest", true)).await.unwrap();

        let listed = posts.list_published(&PostFilter::default()).await.unwrap();

        let slugs: Vec<&str> = listed.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["newest", "oldest"]);
    }

    #[tokio::test]
    async fn test_list_search_is_case_insensitive() {
        let (_, posts, _) = repos();

        posts
            .insert(new_post("Rust Patterns", "rust-patterns", true))
            .await
            .unwrap();
        posts.insert(new_post("Go Basics", "go-basics", true)).await.unwrap();

        let filter = PostFilter {
            search: Some("RUST".to_string()),
            ..Default::default()
        };
        let listed = posts.list_published(&filter).await.unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].slug, "rust-patterns");
    }

    #[tokio::test]
    async fn test_list_skip_and_limit_paginate() {
        let (_, posts, _) = repos();

        for i in 1..=5 {
            posts
                .insert(new_post(&format!("Post {i}"), &format!("post-{i}"), true))
                .await
                .unwrap();
        }

        let filter = PostFilter {
            skip: 1,
            limit: 2,
            ..Default::default()
        };
        let listed = posts.list_published(&filter).await.unwrap();

        let slugs: Vec<&str> = listed.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["post-4", "post-3"]);
    }

    #[tokio::test]
    async fn test_update_applies_only_given_fields() {
        let (_, posts, _) = repos();

        let created = posts.insert(new_post("Title", "title", false)).await.unwrap();
        assert_eq!(created.updated_at, None);

        let updated = posts
            .update_fields(
                created.id,
                PostChanges {
                    published: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "Title");
        assert!(updated.published);
        assert!(updated.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_update_missing_post_is_not_found() {
        let (_, posts, _) = repos();

        let result = posts.update_fields(99, PostChanges::default()).await;

        assert!(matches!(result.unwrap_err(), RepoError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_missing_post_is_not_found() {
        let (_, posts, _) = repos();

        let result = posts.delete(99).await;

        assert!(matches!(result.unwrap_err(), RepoError::NotFound));
    }

    #[tokio::test]
    async fn test_category_delete_clears_post_references() {
        let (_, posts, categories) = repos();

        let category = categories
            .insert(NewCategory {
                name: "Tech".to_string(),
                slug: "tech".to_string(),
            })
            .await
            .unwrap();

        let mut post = new_post("Tagged", "tagged", true);
        post.category_id = Some(category.id);
        let created = posts.insert(post).await.unwrap();

        categories.delete(category.id).await.unwrap();

        let reloaded = posts.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(reloaded.category_id, None);
    }

    #[tokio::test]
    async fn test_duplicate_category_name_is_rejected() {
        let (_, _, categories) = repos();

        categories
            .insert(NewCategory {
                name: "Tech".to_string(),
                slug: "tech".to_string(),
            })
            .await
            .unwrap();

        let result = categories
            .insert(NewCategory {
                name: "Tech".to_string(),
                slug: "tech-2".to_string(),
            })
            .await;

        assert!(matches!(result.unwrap_err(), RepoError::Constraint(_)));
    }
}
