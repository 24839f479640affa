//! Partial task updates.
//!
//! A [`TaskPatch`] records, per field, whether the client supplied it.
//! [`merge`] then folds the patch over the stored task:
//!
//! - `title`, `description`, `created_at`: replaced only when supplied and
//!   non-empty; an empty string keeps the stored value.
//! - `status`: replaced whenever supplied. An explicit `0` marks the task
//!   incomplete again; it is not treated as "absent".

use crate::types::{Task, TaskStatus};
use crate::validate::rules::task_update;
use crate::validate::{Object, ValidationError};

/// The fields a client asked to change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub created_at: Option<String>,
    pub status: Option<TaskStatus>,
}

impl TaskPatch {
    /// Validate the supplied fields of an update body, in declaration order.
    ///
    /// Absent and `null` fields are left as `None`. Any other key (including
    /// `id`) is ignored.
    ///
    /// # Errors
    ///
    /// Returns the first supplied field's `ValidationError`.
    pub fn from_object(body: &Object) -> Result<Self, ValidationError> {
        let title = task_update::TITLE.optional_text(body)?;
        let description = task_update::DESCRIPTION.optional_text(body)?;
        let created_at = task_update::CREATED_AT.optional_text(body)?;
        let status = task_update::STATUS.optional_integer(body)?;

        Ok(Self {
            title: title.map(str::to_owned),
            description: description.map(str::to_owned),
            created_at: created_at.map(str::to_owned),
            status: status.map(TaskStatus::new),
        })
    }
}

/// Compute the record to persist for an update.
#[must_use]
pub fn merge(existing: &Task, patch: &TaskPatch) -> Task {
    Task {
        id: existing.id.clone(),
        title: pick_text(patch.title.as_deref(), &existing.title),
        description: pick_text(patch.description.as_deref(), &existing.description),
        created_at: pick_text(patch.created_at.as_deref(), &existing.created_at),
        status: patch.status.unwrap_or(existing.status),
    }
}

fn pick_text(supplied: Option<&str>, stored: &str) -> String {
    match supplied {
        Some(value) if !value.is_empty() => value.to_owned(),
        _ => stored.to_owned(),
    }
}
