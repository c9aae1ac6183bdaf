//! `PostgreSQL` adapters for the task store.

pub mod models;
pub mod repository;
pub mod schema;

pub use repository::{PostgresTaskRepository, TaskPgPool};
