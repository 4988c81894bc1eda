//! User data models and API request/response types.
//!
//! This module defines:
//! - `User`: Stored account record, including the password hash
//! - `SignupRequest` / `UpdateUserRequest`: Request bodies
//! - `UserResponse` / `LoginResponse`: Response bodies (never carry the hash)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a user record from the store.
///
/// Maps to the `users` table. `email` is unique across all users.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,

    pub name: String,

    pub email: String,

    /// Argon2id PHC string (algorithm, parameters, salt and digest)
    pub password_hash: String,

    pub created_at: DateTime<Utc>,
}

/// Fields needed to create a user once the password has been hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Partial update applied to a stored user. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

/// Request body for `POST /signup`.
///
/// # JSON Example
///
/// ```json
/// {
///   "name": "Ada",
///   "email": "ada@example.com",
///   "password": "correct horse",
///   "confirmPassword": "correct horse"
/// }
/// ```
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Request body for `PUT /Users/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Public view of a user returned by `GET /Users`.
///
/// ```json
/// {
///   "_id": "550e8400-e29b-41d4-a716-446655440000",
///   "name": "Ada",
///   "email": "ada@example.com",
///   "createdAt": "2025-12-20T10:00:00Z"
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Drops the password hash.
impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// Response body for `POST /signup`.
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub message: &'static str,
    pub user_id: Uuid,
}

/// Identity echoed back by a successful login.
#[derive(Debug, Serialize)]
pub struct LoginUser {
    pub email: String,
    #[serde(rename = "_id")]
    pub id: Uuid,
}

/// Response body for `POST /login`.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub user: LoginUser,
}
