//! User directory for Taskboard.
//!
//! Stores user identity, the invitation ("joining ID") registration flow,
//! the admin role flag, and the three per-user task membership sets
//! (assigned, in progress, completed). The membership sets are mutated only
//! through the [`crate::task`] lifecycle coordinator and the registration
//! service below. The module follows hexagonal architecture:
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
