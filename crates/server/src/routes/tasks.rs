//! Task route handlers.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use serde_json::Value;
use tracing::instrument;

use taskboard_core::validate::rules::new_task_from_object;
use taskboard_core::{Task, TaskId, TaskPatch, merge};

use crate::envelope::Envelope;
use crate::error::Result;
use crate::services::existence;
use crate::state::AppState;

/// List every task.
#[instrument(skip_all)]
pub async fn list(State(state): State<AppState>) -> Result<Envelope<Vec<Task>>> {
    let tasks = state.store().list_tasks().await?;
    tracing::debug!(count = tasks.len(), "listed tasks");
    Ok(Envelope::ok("registered tasks", tasks))
}

/// Get a task by id.
#[instrument(skip_all, fields(task_id = %id))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Envelope<Task>> {
    let task = existence::require_task(state.store(), &TaskId::new(id)).await?;
    Ok(Envelope::ok("found task", task))
}

/// Create a task.
///
/// Validates `id` (at least 4 characters, starting with `t`), `title` and
/// `description`, requires the id to be unused, then inserts with the
/// store's defaults for `created_at` and `status`.
#[instrument(skip_all, fields(task_id = tracing::field::Empty))]
pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Envelope<Task>> {
    let body = super::json_object(payload)?;
    let new_task = new_task_from_object(&body)?;
    tracing::Span::current().record("task_id", new_task.id.as_str());

    let store = state.store();
    existence::ensure_task_absent(store, &new_task.id).await?;
    let task = store.insert_task(&new_task).await?;

    tracing::info!(task_id = %task.id, "task created");
    Ok(Envelope::created("created task", task))
}

/// Partially update a task.
///
/// Only supplied fields are validated. The stored task is then merged with
/// the patch and written back whole.
#[instrument(skip_all, fields(task_id = %id))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Envelope<Task>> {
    let body = super::json_object(payload)?;
    let patch = TaskPatch::from_object(&body)?;

    let store = state.store();
    let existing = existence::require_task(store, &TaskId::new(id)).await?;
    let merged = merge(&existing, &patch);
    let task = store.update_task(&merged).await?;

    tracing::info!(task_id = %task.id, "task updated");
    Ok(Envelope::ok("updated task", task))
}
