//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Pantry                                 │
//! │                                                                         │
//! │  Handler → Result<T, ApiError>                                         │
//! │      │                                                                  │
//! │      ├── JsonRejection        ──► 400 VALIDATION_ERROR {general}       │
//! │      ├── CoreError::Validation──► 400 VALIDATION_ERROR {field: msg}    │
//! │      ├── CoreError::NotFound  ──► 404 NOT_FOUND                        │
//! │      ├── CoreError::NoPending ──► 400 NO_PENDING_ITEMS                 │
//! │      └── DbError              ──► 500 DATABASE_ERROR (logged, generic) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The body is always JSON:
//! ```json
//! {
//!   "code": "VALIDATION_ERROR",
//!   "message": "Validation failed: quantity must be greater than 0",
//!   "errors": { "quantity": "quantity must be greater than 0" }
//! }
//! ```

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pantry_core::{CoreError, FieldErrors};
use pantry_db::DbError;
use serde::Serialize;

use crate::lifecycle::LifecycleError;

/// Error body returned by every failing request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// Per-field messages, present on validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Bulk purchase with nothing pending (400)
    NoPendingItems,

    /// Concurrent modification (409)
    Conflict,

    /// Database operation failed (500)
    DatabaseError,

    /// Internal server error (500)
    Internal,

    /// Dependency unavailable (503)
    ServiceUnavailable,
}

impl ErrorCode {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError | ErrorCode::NoPendingItems => StatusCode::BAD_REQUEST,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::DatabaseError | ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            errors: None,
        }
    }

    /// A validation failure carrying its field errors.
    pub fn validation(errors: FieldErrors) -> Self {
        ApiError {
            code: ErrorCode::ValidationError,
            message: format!("Validation failed: {errors}"),
            errors: Some(errors),
        }
    }

    /// A validation failure that belongs to no single field.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::validation(FieldErrors::general(message))
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    pub fn status_code(&self) -> StatusCode {
        self.code.status_code()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(self)).into_response()
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(errors) => ApiError::validation(errors),
            CoreError::NotFound { .. } => ApiError::new(ErrorCode::NotFound, err.to_string()),
            CoreError::NoPendingItems => ApiError::new(ErrorCode::NoPendingItems, err.to_string()),
            CoreError::Conflict { .. } => ApiError::new(ErrorCode::Conflict, err.to_string()),
        }
    }
}

/// Converts database errors to API errors.
///
/// The client never sees store internals.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::ConnectionFailed(_) | DbError::PoolExhausted => {
                tracing::error!(error = %err, "Database unavailable");
                ApiError::new(ErrorCode::DatabaseError, "Database unavailable")
            }
            _ => {
                tracing::error!(error = %err, "Database operation failed");
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

impl From<LifecycleError> for ApiError {
    fn from(err: LifecycleError) -> Self {
        match err {
            LifecycleError::Domain(e) => e.into(),
            LifecycleError::Persistence(e) => e.into(),
        }
    }
}

/// Malformed or non-JSON request bodies.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected request body");
        ApiError::bad_request(rejection.body_text())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
