//! Task lifecycle status and priority enums.

use super::{ParsePriorityError, ParseTaskStatusError};
use serde::{Deserialize, Serialize};

/// Task lifecycle status.
///
/// The transition graph is complete: any status is reachable from any
/// other, triggered only by explicit calls through the lifecycle
/// coordinator. There is no terminal status; a completed task may be moved
/// back to assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task has been handed to an assignee but work has not started.
    Assigned,
    /// Task is being worked on.
    InProgress,
    /// Task work has finished.
    Completed,
}

impl TaskStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [Self; 3] = [Self::Assigned, Self::InProgress, Self::Completed];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Assigned => "assigned",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    /// Returns the numeric wire code (0, 1, 2) used by the REST boundary.
    #[must_use]
    pub const fn code(self) -> i16 {
        match self {
            Self::Assigned => 0,
            Self::InProgress => 1,
            Self::Completed => 2,
        }
    }

    /// Parses a numeric wire code.
    ///
    /// # Errors
    ///
    /// Returns [`ParseTaskStatusError`] for codes outside 0..=2.
    pub fn from_code(code: i16) -> Result<Self, ParseTaskStatusError> {
        match code {
            0 => Ok(Self::Assigned),
            1 => Ok(Self::InProgress),
            2 => Ok(Self::Completed),
            other => Err(ParseTaskStatusError(other.to_string())),
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "assigned" => Ok(Self::Assigned),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Task priority, orthogonal to lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Below-normal urgency.
    Low,
    /// Default urgency.
    #[default]
    Normal,
    /// Above-normal urgency.
    High,
}

impl Priority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
        }
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "normal" => Ok(Self::Normal),
            "high" => Ok(Self::High),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}
