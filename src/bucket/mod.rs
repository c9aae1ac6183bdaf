//! Shared file bucket for Taskboard.
//!
//! Bucket items are standalone uploaded file records unrelated to tasks.
//! The bytes live behind the [`ports::FileStorage`] contract; the record
//! only carries the opaque reference and content type the storage backend
//! returned. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
