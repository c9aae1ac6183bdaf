//! Task store and lifecycle coordination for Taskboard.
//!
//! Task records move through a fixed three-state lifecycle
//! (assigned, in progress, completed) with an orthogonal one-way archive
//! flag. The lifecycle coordinator in [`services`] is the only writer of
//! task status and of the assignee's membership sets, keeping the two in
//! agreement. The module follows hexagonal architecture:
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
