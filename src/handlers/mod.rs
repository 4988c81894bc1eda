//! HTTP request handlers (route handlers).
//!
//! Each handler extracts request data, performs one store operation and
//! shapes the JSON response.

use uuid::Uuid;

use crate::error::AppError;

/// Signup and login endpoints
pub mod auth;
/// Shared list/create/update/delete for schema-free collections
pub mod documents;
pub mod health;
pub mod reviews;
/// Authenticated user management
pub mod users;

/// Parse a path identifier, rejecting anything that is not a UUID.
pub(crate) fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::InvalidId(raw.to_string()))
}
