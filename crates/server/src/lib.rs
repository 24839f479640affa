//! Taskboard server library.
//!
//! This crate provides the HTTP service as a library, allowing the router
//! to be driven by tests and reused by the CLI.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod envelope;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;

use axum::Router;

use state::AppState;

/// Build the application router with request tracing.
///
/// CORS and Sentry layers are added by the binary, which owns the config.
pub fn app(state: AppState) -> Router {
    routes::routes()
        .with_state(state)
        .layer(middleware::trace_layer())
}
