//! Application state - shared across all handlers.

use std::sync::Arc;

use vellum_core::ports::{CategoryRepository, PostRepository, UserRepository};
use vellum_infra::database::{
    InMemoryCategoryRepository, InMemoryPostRepository, InMemoryStore, InMemoryUserRepository,
    PostgresCategoryRepository, PostgresPostRepository, PostgresUserRepository,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub app_name: String,
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub categories: Arc<dyn CategoryRepository>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        if let Some(db_config) = &config.database {
            match vellum_infra::connect(db_config).await {
                Ok(conn) => {
                    let conn = Arc::new(conn);
                    tracing::info!("Application state initialized");
                    return Self {
                        app_name: config.app_name.clone(),
                        users: Arc::new(PostgresUserRepository::new(conn.clone())),
                        posts: Arc::new(PostgresPostRepository::new(conn.clone())),
                        categories: Arc::new(PostgresCategoryRepository::new(conn)),
                    };
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using the in-memory store.",
                        e
                    );
                }
            }
        } else {
            tracing::warn!("DATABASE_URL not set. Running with the in-memory store.");
        }

        Self {
            app_name: config.app_name.clone(),
            ..Self::in_memory()
        }
    }

    /// State backed by the shared in-memory store. Data is lost on restart;
    /// the end-to-end tests run against this.
    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self {
            app_name: "Vellum".to_string(),
            users: Arc::new(InMemoryUserRepository::new(store.clone())),
            posts: Arc::new(InMemoryPostRepository::new(store.clone())),
            categories: Arc::new(InMemoryCategoryRepository::new(store)),
        }
    }
}
