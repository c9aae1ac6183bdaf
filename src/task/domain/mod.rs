//! Domain model for the task store.
//!
//! The task domain models the task aggregate, its three-state lifecycle
//! status with first-entry timestamps, and presence-tagged partial edits
//! while keeping all infrastructure concerns outside of the domain
//! boundary.

mod edit;
mod error;
mod ids;
mod status;
mod task;

pub use edit::TaskEdit;
pub use error::{ParsePriorityError, ParseTaskStatusError, TaskDomainError};
pub use ids::TaskId;
pub use status::{Priority, TaskStatus};
pub use task::{NewTask, PersistedTaskData, Task};
