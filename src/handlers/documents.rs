//! Generic document handlers.
//!
//! Dresses, accessories and bookings are served by the same four handlers;
//! the router fixes the [`Collection`] each route operates on:
//! - GET /{collection} - List every document
//! - POST /{collection} - Insert the request body
//! - PUT /{collection}/{id} - Merge the body into an existing document
//! - DELETE /{collection}/{id} - Remove a document

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use super::parse_id;
use crate::{
    error::AppError,
    extractors::JsonBody,
    models::document::{Collection, CreatedResponse, Document, Fields, MessageResponse, sanitize},
    state::AppState,
};

/// List all documents of a collection, unfiltered and unpaginated.
///
/// # Response (200 OK)
///
/// ```json
/// [
///   { "_id": "550e8400-e29b-41d4-a716-446655440000", "name": "Aurora", "price": 1200 }
/// ]
/// ```
pub async fn list_documents(
    State(state): State<AppState>,
    collection: Collection,
) -> Result<Json<Vec<Document>>, AppError> {
    let documents = state.store.list_documents(collection).await?;
    Ok(Json(documents))
}

/// Insert the request body as a new document.
///
/// The body must be a JSON object and is stored as sent, except that any
/// `_id` field is discarded in favour of the server-assigned identifier.
///
/// # Response (201 Created)
///
/// ```json
/// { "message": "Product created", "id": "550e8400-e29b-41d4-a716-446655440000" }
/// ```
pub async fn create_document(
    State(state): State<AppState>,
    collection: Collection,
    JsonBody(body): JsonBody<Fields>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let document = state
        .store
        .insert_document(collection, sanitize(body))
        .await?;

    tracing::debug!(%collection, id = %document.id, "document created");

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: collection.created_message(),
            id: document.id,
        }),
    ))
}

/// Merge the request body into an existing document.
///
/// Top-level fields present in the body overwrite the stored ones; all
/// other fields are left untouched.
///
/// # Response
///
/// - **200 OK**: `{ "message": "Product updated" }`
/// - **400**: `id` is not a UUID
/// - **404**: no document with this id
pub async fn update_document(
    State(state): State<AppState>,
    collection: Collection,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody<Fields>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_id(&id)?;

    if !state
        .store
        .merge_document(collection, id, sanitize(patch))
        .await?
    {
        return Err(AppError::NotFound);
    }

    Ok(Json(MessageResponse {
        message: "Product updated",
    }))
}

/// Delete a document by id.
///
/// # Response
///
/// - **200 OK**: `{ "message": "Product deleted" }`
/// - **400**: `id` is not a UUID
/// - **404**: no document with this id
pub async fn delete_document(
    State(state): State<AppState>,
    collection: Collection,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_id(&id)?;

    if !state.store.delete_document(collection, id).await? {
        return Err(AppError::NotFound);
    }

    tracing::info!(%collection, %id, "document deleted");

    Ok(Json(MessageResponse {
        message: "Product deleted",
    }))
}
