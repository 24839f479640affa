//! Task records.

use serde::{Deserialize, Serialize};

use super::id::TaskId;
use super::status::TaskStatus;

/// A task as stored and returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Task {
    /// Unique key; always starts with `t`.
    pub id: TaskId,
    pub title: String,
    pub description: String,
    /// Timestamp string assigned by the store on insert, client-overridable on update.
    pub created_at: String,
    pub status: TaskStatus,
}

/// A task that passed validation and is ready to be inserted.
///
/// `created_at` and `status` are left to the store defaults.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub id: TaskId,
    pub title: String,
    pub description: String,
}
