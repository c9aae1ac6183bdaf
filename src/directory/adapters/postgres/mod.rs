//! `PostgreSQL` adapters for the user directory.

pub mod models;
pub mod repository;
pub mod schema;

pub use repository::{PostgresUserRepository, UserPgPool};
