//! Router construction.
//!
//! Public and authenticated routes are built separately; the authenticated
//! group carries the Basic-auth middleware as a route layer so that
//! unmatched paths still return 404 rather than 401.

use axum::{
    Router,
    extract::{Path, State},
    http::{
        HeaderValue, Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    middleware as axum_middleware,
    routing::{MethodRouter, get, post, put},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    extractors::JsonBody,
    handlers::{auth, documents, health, reviews, users},
    middleware::auth::auth_middleware,
    models::document::{Collection, Fields},
    state::AppState,
};

/// A configured CORS origin could not be used.
#[derive(Debug, thiserror::Error)]
#[error("invalid CORS origin {origin:?}: {reason}")]
pub struct InvalidOrigin {
    pub origin: String,
    pub reason: String,
}

/// Build the CORS layer for the configured browser origins.
///
/// Origins are normalised to `scheme://host[:port]` so a trailing slash in
/// configuration does not silently break matching.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer, InvalidOrigin> {
    let invalid = |origin: &str, reason: String| InvalidOrigin {
        origin: origin.to_string(),
        reason,
    };

    let origins = origins
        .iter()
        .map(|origin| {
            let parsed = url::Url::parse(origin).map_err(|e| invalid(origin, e.to_string()))?;
            let serialized = parsed.origin().ascii_serialization();
            if serialized == "null" {
                return Err(invalid(origin, "origin has no host".to_string()));
            }
            HeaderValue::from_str(&serialized).map_err(|e| invalid(origin, e.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .allow_credentials(true))
}

/// GET lists and POST inserts into `collection`.
fn list_and_create(collection: Collection) -> MethodRouter<AppState> {
    get(move |state: State<AppState>| documents::list_documents(state, collection)).post(
        move |state: State<AppState>, body: JsonBody<Fields>| {
            documents::create_document(state, collection, body)
        },
    )
}

/// PUT merges into and DELETE removes a document of `collection`.
fn update_and_delete(collection: Collection) -> MethodRouter<AppState> {
    put(
        move |state: State<AppState>, id: Path<String>, body: JsonBody<Fields>| {
            documents::update_document(state, collection, id, body)
        },
    )
    .delete(move |state: State<AppState>, id: Path<String>| {
        documents::delete_document(state, collection, id)
    })
}

/// Path prefixes serving the user management routes.
const USER_PATHS: [&str; 2] = ["/Users", "/users"];

/// Assemble the full application router.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let mut authenticated_routes = Router::new().route("/reviews", post(reviews::create_review));

    // Clients address the user routes under both spellings
    for base in USER_PATHS {
        authenticated_routes = authenticated_routes
            .route(base, get(users::list_users))
            .route(
                &format!("{base}/{{id}}"),
                put(users::update_user).delete(users::delete_user),
            );
    }

    let authenticated_routes = authenticated_routes.route_layer(
        axum_middleware::from_fn_with_state(state.clone(), auth_middleware),
    );

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/dresses", list_and_create(Collection::Dresses))
        .route("/dresses/{id}", update_and_delete(Collection::Dresses))
        .route("/accessories", list_and_create(Collection::Accessories))
        .route("/accessories/{id}", update_and_delete(Collection::Accessories))
        .route("/reviews", get(reviews::list_reviews))
        .route("/bookings", list_and_create(Collection::Bookings));

    Router::new()
        .merge(public_routes)
        .merge(authenticated_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
