//! Database adapters: PostgreSQL via SeaORM plus an in-memory fallback.

mod connections;

pub mod entity;
pub mod memory;
pub mod postgres;

pub use connections::{DatabaseConfig, connect};
pub use memory::{
    InMemoryCategoryRepository, InMemoryPostRepository, InMemoryStore, InMemoryUserRepository,
};
pub use postgres::{PostgresCategoryRepository, PostgresPostRepository, PostgresUserRepository};

#[cfg(test)]
mod tests;
