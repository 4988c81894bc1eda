//! Review handlers.
//!
//! - GET /reviews - Public list of all reviews
//! - POST /reviews - Add a review as the authenticated user
//!
//! Reviews have no update or delete route.

use axum::{Extension, Json, extract::State, http::StatusCode};
use chrono::Utc;
use serde_json::Value;

use crate::{
    error::AppError,
    extractors::JsonBody,
    middleware::auth::AuthenticatedUser,
    models::document::{Collection, Document, Fields, ReviewCreatedResponse, sanitize},
    state::AppState,
};

pub async fn list_reviews(State(state): State<AppState>) -> Result<Json<Vec<Document>>, AppError> {
    let reviews = state.store.list_documents(Collection::Reviews).await?;
    Ok(Json(reviews))
}

/// Stamp the author's identity and the server time onto a review body,
/// replacing whatever the caller sent under those keys.
fn stamp_review(mut body: Fields, author: &AuthenticatedUser) -> Fields {
    body.insert("userId".to_string(), Value::String(author.id.to_string()));
    body.insert("userName".to_string(), Value::String(author.name.clone()));
    body.insert("createdAt".to_string(), Value::String(Utc::now().to_rfc3339()));
    body
}

/// Add a review.
///
/// # Authentication
///
/// Requires a valid `Authorization: Basic` header.
///
/// # Response (201 Created)
///
/// ```json
/// {
///   "message": "Review added",
///   "id": "770e8400-e29b-41d4-a716-446655440002",
///   "review": {
///     "_id": "770e8400-e29b-41d4-a716-446655440002",
///     "rating": 5,
///     "comment": "Lovely fitting",
///     "userId": "550e8400-e29b-41d4-a716-446655440000",
///     "userName": "Ada",
///     "createdAt": "2025-12-21T16:00:00+00:00"
///   }
/// }
/// ```
pub async fn create_review(
    State(state): State<AppState>,
    Extension(author): Extension<AuthenticatedUser>,
    JsonBody(body): JsonBody<Fields>,
) -> Result<(StatusCode, Json<ReviewCreatedResponse>), AppError> {
    let review = stamp_review(sanitize(body), &author);

    let document = state
        .store
        .insert_document(Collection::Reviews, review)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ReviewCreatedResponse {
            message: Collection::Reviews.created_message(),
            id: document.id,
            review: document,
        }),
    ))
}
