//! User management handlers. Every route here sits behind the auth
//! middleware.
//!
//! - GET /Users - List users (without password hashes)
//! - PUT /Users/{id} - Update your own name, email or password
//! - DELETE /Users/{id} - Delete your own account

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use uuid::Uuid;

use super::parse_id;
use crate::{
    error::AppError,
    extractors::JsonBody,
    middleware::auth::AuthenticatedUser,
    models::{
        document::MessageResponse,
        user::{UpdateUserRequest, UserChanges, UserResponse},
    },
    services::auth_service,
    state::AppState,
};

pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = state.store.list_users().await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

/// Only the account owner may change or remove a user record.
fn ensure_owner(caller: &AuthenticatedUser, target: Uuid) -> Result<(), AppError> {
    if caller.id != target {
        tracing::debug!(caller = %caller.id, %target, "rejected change to another user's account");
        return Err(AppError::Forbidden);
    }
    Ok(())
}

/// Validate an update request and turn it into store changes, hashing a new
/// password if one was given.
fn build_changes(request: UpdateUserRequest) -> Result<UserChanges, AppError> {
    if let Some(ref email) = request.email {
        auth_service::validate_email(email)?;
    }

    let password_hash = match request.password {
        Some(ref password) => {
            auth_service::validate_password(password)?;
            Some(auth_service::hash_password(password)?)
        }
        None => None,
    };

    Ok(UserChanges {
        name: request.name,
        email: request.email,
        password_hash,
    })
}

/// Partially update the caller's own user record.
///
/// # Request Body
///
/// Any subset of:
///
/// ```json
/// { "name": "Ada L.", "email": "ada@new.example", "password": "new password" }
/// ```
///
/// # Response
///
/// - **200 OK**: `{ "message": "User updated" }`
/// - **400**: invalid id, email or password
/// - **403**: `id` is not the caller's
/// - **404**: user no longer exists
/// - **409**: email belongs to another user
pub async fn update_user(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<UpdateUserRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_id(&id)?;
    ensure_owner(&caller, id)?;

    let changes = build_changes(request)?;
    if !state.store.update_user(id, changes).await? {
        return Err(AppError::NotFound);
    }

    Ok(Json(MessageResponse {
        message: "User updated",
    }))
}

/// Delete the caller's own user record.
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_id(&id)?;
    ensure_owner(&caller, id)?;

    if !state.store.delete_user(id).await? {
        return Err(AppError::NotFound);
    }

    tracing::info!(user_id = %id, "user deleted");

    Ok(Json(MessageResponse {
        message: "User deleted",
    }))
}
