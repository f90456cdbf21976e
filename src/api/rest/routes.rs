//! # REST Routes
//!
//! Router construction for the REST API.

use crate::api::rest::handlers::{
    AppState, delete_cached, get_all, get_best, get_first, health, method_not_allowed, not_found,
    server_header,
};
use axum::Router;
use axum::middleware;
use axum::routing::{delete, get};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builds the REST router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Lookups
        .route("/api/barcode/{barcode}", get(get_best))
        .route("/api/barcode/{barcode}/first", get(get_first))
        .route("/api/barcode/{barcode}/all", get(get_all))
        .route("/api/barcode/{barcode}/cache", delete(delete_cached))
        // Health
        .route("/api/health", get(health))
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(middleware::from_fn_with_state(state.clone(), server_header))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
