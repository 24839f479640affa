//! Success payloads.
//!
//! A successful response is a JSON object with one key, a short
//! natural-language label naming what the value is:
//!
//! ```json
//! { "created task": { "id": "t001", "title": "...", ... } }
//! ```

use std::collections::BTreeMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// A labelled success payload with its status code.
#[derive(Debug)]
pub struct Envelope<T> {
    status: StatusCode,
    label: &'static str,
    body: T,
}

impl<T: Serialize> Envelope<T> {
    /// `200 OK` with `{ label: body }`.
    pub const fn ok(label: &'static str, body: T) -> Self {
        Self {
            status: StatusCode::OK,
            label,
            body,
        }
    }

    /// `201 Created` with `{ label: body }`.
    pub const fn created(label: &'static str, body: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            label,
            body,
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        let payload = BTreeMap::from([(self.label, self.body)]);
        (self.status, Json(payload)).into_response()
    }
}
