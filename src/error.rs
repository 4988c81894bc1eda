//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application-wide error type.
///
/// # Error Categories
///
/// - **Client input errors**: bad signup fields, malformed identifiers
/// - **Authentication errors**: missing header, unknown user, wrong password
/// - **Authorization errors**: touching another user's record
/// - **Resource errors**: identifier matches nothing, email already taken
/// - **Internal errors**: database and hashing failures
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed (e.g., connection error, query error).
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Hashing a new password failed.
    #[error("Password hashing failed")]
    PasswordHash,

    /// Request body failed validation.
    ///
    /// Returns HTTP 400 Bad Request with the failing rule as message.
    #[error("{0}")]
    Validation(String),

    /// Path identifier is not a valid UUID.
    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    /// Credentials missing, malformed, or wrong.
    ///
    /// Returns HTTP 401 Unauthorized.
    #[error("{0}")]
    Unauthorized(&'static str),

    /// Authenticated user may not act on the target record.
    #[error("You may only modify your own account")]
    Forbidden,

    /// No record with the requested identifier.
    #[error("Resource not found")]
    NotFound,

    /// A user with this email already exists.
    #[error("Email already registered")]
    EmailTaken,
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
///
/// Internal errors are logged and replaced by a generic message.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::Validation(ref msg) => {
                (StatusCode::BAD_REQUEST, "validation_error", msg.clone())
            }
            AppError::InvalidId(_) => (StatusCode::BAD_REQUEST, "invalid_id", self.to_string()),
            AppError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, "unauthorized", msg.to_string())
            }
            AppError::Forbidden => (StatusCode::FORBIDDEN, "forbidden", self.to_string()),
            AppError::NotFound => (StatusCode::NOT_FOUND, "not_found", self.to_string()),
            AppError::EmailTaken => (StatusCode::CONFLICT, "email_taken", self.to_string()),
            AppError::Database(_) | AppError::PasswordHash => {
                tracing::error!(error = %self, "request failed with internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
