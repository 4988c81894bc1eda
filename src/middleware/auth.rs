//! Basic-auth middleware.
//!
//! This middleware intercepts every protected request to:
//! 1. Read the `Authorization: Basic <base64(email:password)>` header
//! 2. Look the user up by email and verify the password hash
//! 3. Inject the authenticated identity into the request
//! 4. Reject everything else with HTTP 401
//!
//! There is no session: each protected request re-authenticates.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{error::AppError, services::auth_service, state::AppState};

/// Identity attached to authenticated requests.
///
/// Handlers extract it with `Extension<AuthenticatedUser>`.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// Authentication middleware function.
///
/// # Returns
///
/// - `Ok(Response)` from the next handler if the credentials verify
/// - `Err(AppError::Unauthorized)` otherwise
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let user = auth_service::authenticate(state.store.as_ref(), header).await?;

    request.extensions_mut().insert(AuthenticatedUser {
        id: user.id,
        name: user.name,
        email: user.email,
    });

    Ok(next.run(request).await)
}
