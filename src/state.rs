//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::store::DocumentStore;

/// State handed to handlers and middleware through axum's `State` extractor.
///
/// Built once in `main` before the listener binds.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}
