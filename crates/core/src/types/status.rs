//! Task completion status.

use serde::{Deserialize, Serialize};

/// Completion status of a task.
///
/// Stored as a plain integer: `0` is incomplete and `1` is complete. Clients
/// may write any integer; only those two values carry meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(feature = "postgres", sqlx(transparent))]
#[serde(transparent)]
pub struct TaskStatus(i32);

impl TaskStatus {
    /// The task has not been completed (the default).
    pub const INCOMPLETE: Self = Self(0);
    /// The task has been completed.
    pub const COMPLETE: Self = Self(1);

    /// Create a status from its stored integer.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }
}

impl From<i32> for TaskStatus {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl From<TaskStatus> for i32 {
    fn from(status: TaskStatus) -> Self {
        status.0
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_incomplete() {
        assert_eq!(TaskStatus::default(), TaskStatus::INCOMPLETE);
        assert_eq!(i32::from(TaskStatus::default()), 0);
    }

    #[test]
    fn test_serializes_as_integer() {
        let json = serde_json::to_string(&TaskStatus::COMPLETE).ok();
        assert_eq!(json.as_deref(), Some("1"));
    }
}
