//! # REST API
//!
//! REST endpoints using axum for barcode lookups.
//!
//! # Endpoints
//!
//! ## Lookups
//! - `GET /api/barcode/{barcode}` - Best-rated product
//! - `GET /api/barcode/{barcode}/first` - First product to arrive
//! - `GET /api/barcode/{barcode}/all` - Every collected product
//! - `DELETE /api/barcode/{barcode}/cache` - Evict the cached product
//!
//! ## Health
//! - `GET /api/health` - Health check endpoint
//!
//! Every response carries a `Server: GetProduct:{version}` header. Failures
//! are returned as `{"error": "..."}`.
//!
//! # Usage
//!
//! ```ignore
//! use getproduct::api::rest::{create_router, AppState};
//! use std::sync::Arc;
//!
//! let state = Arc::new(AppState::new(Arc::new(engine), "0.1.0"));
//! let router = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, router).await?;
//! ```

pub mod handlers;
pub mod routes;

pub use handlers::{ApiError, ApiResult, AppState, ErrorResponse, HealthResponse};
pub use routes::create_router;
