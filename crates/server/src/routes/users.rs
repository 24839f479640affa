//! User route handlers.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
};
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use taskboard_core::validate::rules::{UserDraft, search_term};
use taskboard_core::{NewUser, User, UserId};

use crate::db::UserKey;
use crate::envelope::Envelope;
use crate::error::{ApiError, Result};
use crate::services::{existence, password};
use crate::state::AppState;

/// Ids of deletable users must start with this character.
const DELETABLE_PREFIX: char = 'f';

/// Query parameters for `GET /users/search`.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// List every user.
#[instrument(skip_all)]
pub async fn list(State(state): State<AppState>) -> Result<Envelope<Vec<User>>> {
    let users = state.store().list_users().await?;
    tracing::debug!(count = users.len(), "listed users");
    Ok(Envelope::ok("registered users", users))
}

/// Search users by a case-insensitive substring of their name.
///
/// An empty or missing `q` is a validation error; no match is an empty list.
#[instrument(skip_all, fields(q = ?query.q))]
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Envelope<Vec<User>>> {
    let term = search_term(query.q.as_deref())?;
    let users = state.store().search_users_by_name(term).await?;
    Ok(Envelope::ok("search result", users))
}

/// Get a user by id.
#[instrument(skip_all, fields(user_id = %id))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Envelope<User>> {
    let user = existence::require_user(state.store(), &UserId::new(id)).await?;
    Ok(Envelope::ok("found user", user))
}

/// Create a user.
///
/// Validates `id`, `name`, `email`, `password` in that order, then requires
/// both `id` and `email` to be unused before inserting.
#[instrument(skip_all, fields(user_id = tracing::field::Empty))]
pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Envelope<User>> {
    let body = super::json_object(payload)?;
    let draft = UserDraft::from_object(&body)?;
    tracing::Span::current().record("user_id", draft.id.as_str());

    let store = state.store();
    existence::ensure_user_absent(store, UserKey::Id(&draft.id)).await?;
    existence::ensure_user_absent(store, UserKey::Email(&draft.email)).await?;

    let new_user = NewUser {
        password_hash: password::hash_password(&draft.password)?,
        id: draft.id,
        name: draft.name,
        email: draft.email,
    };
    let user = store.insert_user(&new_user).await?;

    tracing::info!(user_id = %user.id, "user created");
    Ok(Envelope::created("created user", user))
}

/// Delete a user.
///
/// Only ids starting with `f` may be deleted; any other id is answered as
/// not found whether or not the user exists.
#[instrument(skip_all, fields(user_id = %id))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Envelope<User>> {
    let id = UserId::new(id);
    if !id.starts_with_char(DELETABLE_PREFIX) {
        return Err(ApiError::AccessRule(format!(
            "user '{id}' cannot be deleted: only ids starting with '{DELETABLE_PREFIX}' can be deleted"
        )));
    }

    let store = state.store();
    let user = existence::require_user(store, &id).await?;
    if !store.delete_user(&id).await? {
        return Err(ApiError::NotFound(format!("no user with id '{id}' exists")));
    }

    tracing::info!(user_id = %id, "user deleted");
    Ok(Envelope::ok("deleted user", user))
}
