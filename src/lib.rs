//! Taskboard: multi-tenant task-assignment backend core.
//!
//! This crate provides the core functionality for an invitation-based user
//! directory, a task store with a fixed three-state lifecycle, and a shared
//! file bucket.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, blob stores)
//!
//! # Modules
//!
//! - [`directory`]: User identity, invitations, and task membership sets
//! - [`task`]: Task records and the lifecycle coordinator that keeps task
//!   status and per-user membership sets in agreement
//! - [`bucket`]: Standalone uploaded file records behind a storage port

pub mod bucket;
pub mod directory;
pub mod task;
