//! Signup and login handlers.
//!
//! - POST /signup - Register a new user
//! - POST /login - Check credentials and return the user's identity

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
};

use crate::{
    error::AppError,
    extractors::JsonBody,
    models::user::{LoginResponse, LoginUser, NewUser, SignupRequest, SignupResponse},
    services::auth_service,
    state::AppState,
};

/// Register a new user.
///
/// # Request Body
///
/// ```json
/// {
///   "name": "Ada",
///   "email": "ada@example.com",
///   "password": "correct horse",
///   "confirmPassword": "correct horse"
/// }
/// ```
///
/// # Response
///
/// - **201 Created**: `{ "message": "User created", "user_id": "<uuid>" }`
/// - **400**: email lacks `@`, password shorter than 8 characters, or
///   confirmation differs
/// - **409**: email already registered
///
/// The existence check is a fast path for the common case; the store's
/// uniqueness guarantee decides concurrent signups.
pub async fn signup(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), AppError> {
    auth_service::validate_signup(&request.email, &request.password, &request.confirm_password)?;

    if state
        .store
        .find_user_by_email(&request.email)
        .await?
        .is_some()
    {
        return Err(AppError::EmailTaken);
    }

    let password_hash = auth_service::hash_password(&request.password)?;
    let user = state
        .store
        .insert_user(NewUser {
            name: request.name,
            email: request.email,
            password_hash,
        })
        .await?;

    tracing::info!(user_id = %user.id, "user signed up");

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "User created",
            user_id: user.id,
        }),
    ))
}

/// Log in with `Authorization: Basic <base64(email:password)>`.
///
/// # Response
///
/// - **200 OK**:
///   ```json
///   { "message": "Login successful", "user": { "email": "ada@example.com", "_id": "<uuid>" } }
///   ```
/// - **401**: header missing/malformed, unknown email or wrong password. The
///   last two share one message.
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<LoginResponse>, AppError> {
    let header = headers.get(AUTHORIZATION).and_then(|h| h.to_str().ok());
    let user = auth_service::authenticate(state.store.as_ref(), header).await?;

    Ok(Json(LoginResponse {
        message: "Login successful",
        user: LoginUser {
            email: user.email,
            id: user.id,
        },
    }))
}
