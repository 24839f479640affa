//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health             - Liveness check (no store access)
//! GET    /ping               - Store round-trip
//!
//! # Users
//! GET    /users              - List users
//! GET    /users/search?q=    - Case-insensitive name search
//! GET    /users/{id}         - Get user by id
//! POST   /users              - Create user
//! DELETE /users/{id}         - Delete user (id must start with 'f')
//!
//! # Tasks
//! GET    /tasks              - List tasks
//! GET    /tasks/{id}         - Get task by id
//! POST   /tasks              - Create task (id must start with 't')
//! PUT    /tasks/{id}         - Partial update
//! ```
//!
//! Each handler validates, checks preconditions against the store, performs
//! at most one write, and answers exactly once through either an
//! [`Envelope`](crate::envelope::Envelope) or an [`ApiError`].

pub mod tasks;
pub mod users;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::get,
};
use serde_json::Value;

use taskboard_core::validate::{self, Object, ValidationError};

use crate::envelope::Envelope;
use crate::error::{ApiError, Result};
use crate::state::AppState;

/// Create the user routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list).post(users::create))
        .route("/search", get(users::search))
        .route("/{id}", get(users::show).delete(users::delete))
}

/// Create the task routes router.
pub fn task_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(tasks::list).post(tasks::create))
        .route("/{id}", get(tasks::show).put(tasks::update))
}

/// Create all routes for the service.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/ping", get(ping))
        .nest("/users", user_routes())
        .nest("/tasks", task_routes())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Store connectivity check.
async fn ping(State(state): State<AppState>) -> Result<Envelope<&'static str>> {
    state.store().ping().await?;
    Ok(Envelope::ok("message", "Pong!"))
}

/// Turn the JSON extractor's outcome into a request object.
///
/// Malformed JSON, a missing content type and non-object bodies all become
/// validation errors, so every bad body is answered with 400 and a message.
pub(crate) fn json_object(payload: std::result::Result<Json<Value>, JsonRejection>) -> Result<Object> {
    let Json(value) =
        payload.map_err(|rejection| ValidationError::MalformedBody(rejection.body_text()))?;
    validate::into_object(value).map_err(ApiError::from)
}
