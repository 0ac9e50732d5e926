//! Repository tests against a mocked database backend.

use std::sync::Arc;

use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

use vellum_core::domain::NewPost;
use vellum_core::error::RepoError;
use vellum_core::ports::{CategoryRepository, PostRepository, UserRepository};

use super::entity::{category, post, user};
use super::postgres::{PostgresCategoryRepository, PostgresPostRepository, PostgresUserRepository};

fn user_row(id: i32, username: &str) -> user::Model {
    user::Model {
        id,
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password_hash: "$argon2id$stub".to_string(),
        created_at: chrono::Utc::now().into(),
    }
}

fn post_row(id: i32, slug: &str) -> post::Model {
    post::Model {
        id,
        title: "Test Post".to_string(),
        slug: slug.to_string(),
        content: "Content".to_string(),
        published: true,
        author_id: 1,
        category_id: None,
        created_at: chrono::Utc::now().into(),
        updated_at: None,
    }
}

#[tokio::test]
async fn test_find_user_by_username_maps_to_domain() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![user_row(3, "alice")]])
        .into_connection();

    let repo = PostgresUserRepository::new(Arc::new(db));

    let user = repo.find_by_username("alice").await.unwrap().unwrap();
    assert_eq!(user.id, 3);
    assert_eq!(user.email, "alice@example.com");
}

#[tokio::test]
async fn test_repositories_share_one_pool_handle() {
    // Application state hands the same Arc-held pool to every repository;
    // only the Arc is cloned, never the connection itself.
    let db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![user_row(1, "alice")]])
            .append_query_results(vec![vec![post_row(2, "shared-pool")]])
            .into_connection(),
    );

    let users = PostgresUserRepository::new(db.clone());
    let posts = PostgresPostRepository::new(db);

    let user = users.find_by_id(1).await.unwrap().unwrap();
    assert_eq!(user.username, "alice");

    let post = posts.find_by_id(2).await.unwrap().unwrap();
    assert_eq!(post.slug, "shared-pool");
}

#[tokio::test]
async fn test_find_missing_post_returns_none() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(Arc::new(db));

    assert!(repo.find_by_slug("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_insert_post_returns_stored_row() {
    // Postgres inserts go through RETURNING, so the mock serves a query
    // result rather than an exec result.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post_row(7, "test-post")]])
        .into_connection();

    let repo = PostgresPostRepository::new(Arc::new(db));

    let post = repo
        .insert(NewPost {
            title: "Test Post".to_string(),
            slug: "test-post".to_string(),
            content: "Content".to_string(),
            published: true,
            author_id: 1,
            category_id: None,
        })
        .await
        .unwrap();

    assert_eq!(post.id, 7);
    assert_eq!(post.slug, "test-post");
    assert_eq!(post.updated_at, None);
}

#[tokio::test]
async fn test_list_published_maps_all_rows() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post_row(2, "second"), post_row(1, "first")]])
        .into_connection();

    let repo = PostgresPostRepository::new(Arc::new(db));

    let posts = repo.list_published(&Default::default()).await.unwrap();
    let slugs: Vec<&str> = posts.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(slugs, vec!["second", "first"]);
}

#[tokio::test]
async fn test_update_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(Arc::new(db));

    let result = repo.update_fields(99, Default::default()).await;

    assert!(matches!(result.unwrap_err(), RepoError::NotFound));
}

#[tokio::test]
async fn test_delete_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(Arc::new(db));

    let result = repo.delete(99).await;

    assert!(matches!(result.unwrap_err(), RepoError::NotFound));
}

#[tokio::test]
async fn test_delete_existing_post_succeeds() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(Arc::new(db));

    assert!(repo.delete(7).await.is_ok());
}

#[tokio::test]
async fn test_list_categories_maps_to_domain() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![category::Model {
            id: 1,
            name: "Tech".to_string(),
            slug: "tech".to_string(),
            created_at: chrono::Utc::now().into(),
        }]])
        .into_connection();

    let repo = PostgresCategoryRepository::new(Arc::new(db));

    let categories = repo.list().await.unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].slug, "tech");
}
