//! Unified error handling with Sentry integration.
//!
//! Every handler returns `Result<_, ApiError>`. The error carries its own
//! taxonomy entry and HTTP status, and becomes exactly one response: the
//! status code plus a plain-text message. Unexpected errors are captured to
//! Sentry before responding and their details are not sent to the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use taskboard_core::ValidationError;

use crate::db::RepositoryError;

/// Taxonomy of request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed, missing or out-of-policy field.
    Validation,
    /// Referenced record is absent.
    NotFound,
    /// Unique field already taken.
    Conflict,
    /// Access rule on the id rejected the request.
    AccessRule,
    /// Anything the handler did not anticipate, store failures included.
    Unexpected,
}

/// Application-level error type for the task board.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A request field failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Resource not found.
    #[error("{0}")]
    NotFound(String),

    /// Unique field already in use.
    #[error("{0}")]
    Conflict(String),

    /// The id does not satisfy the operation's access rule.
    #[error("{0}")]
    AccessRule(String),

    /// Store operation failed.
    #[error("Database error: {0}")]
    Database(#[source] RepositoryError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Conflict(message) => Self::Conflict(message),
            RepositoryError::NotFound => Self::NotFound("the record no longer exists".to_owned()),
            other => Self::Database(other),
        }
    }
}

impl ApiError {
    /// Taxonomy entry of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::AccessRule(_) => ErrorKind::AccessRule,
            Self::Database(_) | Self::Internal(_) => ErrorKind::Unexpected,
        }
    }

    /// HTTP status sent for this error.
    ///
    /// Duplicates are reported as 400 and access-rule failures as 404, the
    /// codes existing clients already handle.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::Validation | ErrorKind::Conflict => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound | ErrorKind::AccessRule => StatusCode::NOT_FOUND,
            ErrorKind::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether this error is a server-side failure.
    #[must_use]
    pub const fn is_unexpected(&self) -> bool {
        matches!(self.kind(), ErrorKind::Unexpected)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Don't expose internal error details to clients
        let message = if self.is_unexpected() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
            "Unexpected error".to_owned()
        } else {
            tracing::info!(kind = ?self.kind(), status = status.as_u16(), error = %self, "Request rejected");
            self.to_string()
        };

        (status, message).into_response()
    }
}

/// Result type alias for `ApiError`.
pub type Result<T> = std::result::Result<T, ApiError>;
