//! Existence checks against the store.
//!
//! Every lookup is an equality filter on one unique field and returns the
//! first match. Whether a hit is good news depends on the caller: creates
//! want the key to be free, reads/updates/deletes want the record present.
//!
//! The check and the following write are separate store calls with no lock
//! between them; two concurrent creates can both pass the check. The
//! `users.email` unique constraint and the primary keys catch what slips
//! through, and the store reports that as a conflict too.

use taskboard_core::{Task, TaskId, User, UserId};

use crate::db::{Store, UserKey};
use crate::error::ApiError;

/// Look up a user by id or email.
///
/// # Errors
///
/// Returns an unexpected error if the store fails.
pub async fn find_user(store: &dyn Store, key: UserKey<'_>) -> Result<Option<User>, ApiError> {
    let user = store.find_user(key).await?;
    tracing::debug!(%key, found = user.is_some(), "user lookup");
    Ok(user)
}

/// Look up a task by id.
///
/// # Errors
///
/// Returns an unexpected error if the store fails.
pub async fn find_task(store: &dyn Store, id: &TaskId) -> Result<Option<Task>, ApiError> {
    let task = store.find_task(id).await?;
    tracing::debug!(task_id = %id, found = task.is_some(), "task lookup");
    Ok(task)
}

/// Fail with `Conflict` if a user already holds `key`.
///
/// # Errors
///
/// Returns `ApiError::Conflict` on a duplicate, or an unexpected error if the store fails.
pub async fn ensure_user_absent(store: &dyn Store, key: UserKey<'_>) -> Result<(), ApiError> {
    match find_user(store, key).await? {
        Some(_) => Err(ApiError::Conflict(format!(
            "a user with {key} already exists"
        ))),
        None => Ok(()),
    }
}

/// Fail with `Conflict` if a task already holds `id`.
///
/// # Errors
///
/// Returns `ApiError::Conflict` on a duplicate, or an unexpected error if the store fails.
pub async fn ensure_task_absent(store: &dyn Store, id: &TaskId) -> Result<(), ApiError> {
    match find_task(store, id).await? {
        Some(_) => Err(ApiError::Conflict(format!(
            "a task with id '{id}' already exists"
        ))),
        None => Ok(()),
    }
}

/// Fetch a user that must exist.
///
/// # Errors
///
/// Returns `ApiError::NotFound` if absent, or an unexpected error if the store fails.
pub async fn require_user(store: &dyn Store, id: &UserId) -> Result<User, ApiError> {
    find_user(store, UserKey::Id(id))
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("no user with id '{id}' exists")))
}

/// Fetch a task that must exist.
///
/// # Errors
///
/// Returns `ApiError::NotFound` if absent, or an unexpected error if the store fails.
pub async fn require_task(store: &dyn Store, id: &TaskId) -> Result<Task, ApiError> {
    find_task(store, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("no task with id '{id}' exists")))
}
