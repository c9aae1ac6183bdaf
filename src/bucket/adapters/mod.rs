//! Adapter implementations for the bucket ports.

pub mod fs;
pub mod memory;
pub mod postgres;
