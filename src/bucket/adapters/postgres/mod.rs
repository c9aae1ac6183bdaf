//! `PostgreSQL` adapters for the bucket.

pub mod models;
pub mod repository;
pub mod schema;

pub use repository::{BucketPgPool, PostgresBucketRepository};
