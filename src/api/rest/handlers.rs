//! # REST Handlers
//!
//! Request handlers, shared state and error mapping for the REST API.

use crate::application::error::LookupError;
use crate::application::services::ProductAggregationEngine;
use crate::context::LookupContext;
use crate::domain::entities::Product;
use crate::domain::errors::DomainError;
use crate::domain::value_objects::Barcode;
use axum::Json;
use axum::extract::{Path, Request, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::error;

/// Shared state of the REST API.
#[derive(Debug)]
pub struct AppState {
    /// Lookup engine.
    pub engine: Arc<ProductAggregationEngine>,
    /// Version reported in the `Server` header and health endpoint.
    pub version: String,
    /// Deadline applied to every lookup request.
    pub request_timeout: Option<Duration>,
}

impl AppState {
    /// Creates state without a request timeout.
    #[must_use]
    pub fn new(engine: Arc<ProductAggregationEngine>, version: impl Into<String>) -> Self {
        Self {
            engine,
            version: version.into(),
            request_timeout: None,
        }
    }

    /// Builder: set the per-request deadline.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Returns the value of the `Server` response header.
    #[must_use]
    pub fn server_header(&self) -> String {
        format!("GetProduct:{}", self.version)
    }

    fn lookup_context(&self) -> LookupContext {
        match self.request_timeout {
            Some(timeout) => LookupContext::with_timeout(timeout),
            None => LookupContext::new(),
        }
    }
}

/// Error body returned by every failing endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human readable message.
    pub error: String,
}

impl ErrorResponse {
    /// Creates an error body.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Health check body.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the server answers.
    pub status: &'static str,
    /// Service version.
    pub version: String,
    /// Number of registered providers.
    pub providers: usize,
}

/// Errors produced by REST handlers.
#[derive(Debug)]
pub enum ApiError {
    /// The barcode path segment is not a valid barcode.
    InvalidBarcode(DomainError),
    /// The lookup failed.
    Lookup(LookupError),
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        Self::InvalidBarcode(error)
    }
}

impl From<LookupError> for ApiError {
    fn from(error: LookupError) -> Self {
        Self::Lookup(error)
    }
}

impl ApiError {
    /// Returns the HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidBarcode(_) => StatusCode::BAD_REQUEST,
            Self::Lookup(LookupError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Lookup(LookupError::DeadlineExceeded { .. }) => StatusCode::GATEWAY_TIMEOUT,
            Self::Lookup(LookupError::Cancelled { .. }) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Lookup(LookupError::NoProviders) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Lookup(LookupError::Cache(_)) => StatusCode::BAD_GATEWAY,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::InvalidBarcode(error) => error.to_string(),
            Self::Lookup(error) => error.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = %status, error = %self.message(), "lookup request failed");
        }
        (status, Json(ErrorResponse::new(self.message()))).into_response()
    }
}

/// Result type for REST handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// `GET /api/barcode/{barcode}`: best-rated product.
///
/// # Errors
///
/// See [`ApiError::status`] for the mapping of failures.
pub async fn get_best(
    State(state): State<Arc<AppState>>,
    Path(barcode): Path<String>,
) -> ApiResult<Json<Product>> {
    let barcode = Barcode::new(barcode)?;
    let ctx = state.lookup_context();
    let _cancel_on_disconnect = ctx.cancel_on_drop();

    let product = state.engine.get_best(&ctx, &barcode).await?;
    Ok(Json(product))
}

/// `GET /api/barcode/{barcode}/first`: first product to arrive.
///
/// # Errors
///
/// See [`ApiError::status`] for the mapping of failures.
pub async fn get_first(
    State(state): State<Arc<AppState>>,
    Path(barcode): Path<String>,
) -> ApiResult<Json<Product>> {
    let barcode = Barcode::new(barcode)?;
    let ctx = state.lookup_context();
    let _cancel_on_disconnect = ctx.cancel_on_drop();

    let product = state.engine.get_first(&ctx, &barcode).await?;
    Ok(Json(product))
}

/// `GET /api/barcode/{barcode}/all`: every collected product.
///
/// # Errors
///
/// See [`ApiError::status`] for the mapping of failures.
pub async fn get_all(
    State(state): State<Arc<AppState>>,
    Path(barcode): Path<String>,
) -> ApiResult<Json<Vec<Product>>> {
    let barcode = Barcode::new(barcode)?;
    let ctx = state.lookup_context();
    let _cancel_on_disconnect = ctx.cancel_on_drop();

    let products = state.engine.get_all(&ctx, &barcode).await?;
    Ok(Json(products))
}

/// `DELETE /api/barcode/{barcode}/cache`: evict the cached product.
///
/// # Errors
///
/// See [`ApiError::status`] for the mapping of failures.
pub async fn delete_cached(
    State(state): State<Arc<AppState>>,
    Path(barcode): Path<String>,
) -> ApiResult<StatusCode> {
    let barcode = Barcode::new(barcode)?;
    let ctx = state.lookup_context();

    state.engine.delete_cached(&ctx, &barcode).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/health`
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: state.version.clone(),
        providers: state.engine.provider_count(),
    })
}

/// Fallback for unknown routes.
pub async fn not_found() -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new("not found")))
}

/// Fallback for known routes requested with an unsupported method.
pub async fn method_not_allowed() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse::new("method is not allowed")),
    )
}

/// Middleware adding the `Server` header to every response.
pub async fn server_header(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&state.server_header()) {
        response.headers_mut().insert(header::SERVER, value);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::cache::CacheError;

    #[test]
    fn status_mapping() {
        let cases = [
            (ApiError::from(DomainError::invalid_barcode("blank")), StatusCode::BAD_REQUEST),
            (ApiError::from(LookupError::not_found("1")), StatusCode::NOT_FOUND),
            (ApiError::from(LookupError::deadline_exceeded("1")), StatusCode::GATEWAY_TIMEOUT),
            (ApiError::from(LookupError::cancelled("1")), StatusCode::SERVICE_UNAVAILABLE),
            (ApiError::from(LookupError::NoProviders), StatusCode::INTERNAL_SERVER_ERROR),
            (
                ApiError::from(LookupError::from(CacheError::backend("down"))),
                StatusCode::BAD_GATEWAY,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.status(), expected, "{error:?}");
        }
    }

    #[test]
    fn server_header_value() {
        let state = AppState::new(Arc::new(ProductAggregationEngine::with_defaults()), "1.2.3");
        assert_eq!(state.server_header(), "GetProduct:1.2.3");
    }

    #[tokio::test]
    async fn lookup_context_carries_request_timeout() {
        let state = AppState::new(Arc::new(ProductAggregationEngine::with_defaults()), "1")
            .with_request_timeout(Some(Duration::from_secs(5)));
        assert!(state.lookup_context().deadline().is_some());

        let state = AppState::new(Arc::new(ProductAggregationEngine::with_defaults()), "1");
        assert!(state.lookup_context().deadline().is_none());
    }
}
