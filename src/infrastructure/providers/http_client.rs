//! # HTTP Client Utilities
//!
//! Shared HTTP client for network-backed product providers.
//!
//! This module provides a reusable HTTP client wrapper with:
//! - Configurable default timeout, tightened per request
//! - JSON deserialization
//! - Mapping of HTTP failures onto [`ProviderError`]
//!
//! # Examples
//!
//! ```ignore
//! use getproduct::infrastructure::providers::http_client::HttpClient;
//!
//! let client = HttpClient::new(5000)?;
//! let record: Option<MyRecord> = client.get_optional(url, None).await?;
//! ```

use crate::infrastructure::providers::error::{ProviderError, ProviderResult};
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client wrapper for product providers.
#[derive(Debug, Clone)]
pub struct HttpClient {
    /// Inner reqwest client.
    client: Client,
    /// Default request timeout in milliseconds.
    timeout_ms: u64,
}

impl HttpClient {
    /// Creates a new HTTP client with the specified timeout.
    ///
    /// # Arguments
    ///
    /// * `timeout_ms` - Default request timeout in milliseconds.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Internal` if the client cannot be created.
    pub fn new(timeout_ms: u64) -> ProviderResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| ProviderError::internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, timeout_ms })
    }

    /// Returns the configured timeout in milliseconds.
    #[inline]
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Makes a GET request and deserializes the JSON response.
    ///
    /// A `404 Not Found` answer is mapped to `Ok(None)`.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to request.
    /// * `timeout` - Optional per-request timeout; the shorter of this and
    ///   the client default applies.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Timeout` or `ProviderError::Connection` if the
    /// request fails.
    /// Returns `ProviderError::Protocol` if the response cannot be parsed.
    pub async fn get_optional<T: DeserializeOwned>(
        &self,
        url: Url,
        timeout: Option<Duration>,
    ) -> ProviderResult<Option<T>> {
        let default_timeout = Duration::from_millis(self.timeout_ms);
        let timeout = timeout.map_or(default_timeout, |t| t.min(default_timeout));

        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        self.handle_response(response).await.map(Some)
    }

    /// Handles the HTTP response, checking status and deserializing JSON.
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> ProviderResult<T> {
        let status = response.status();

        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| ProviderError::protocol(format!("Failed to parse response: {}", e)))
        } else {
            let error_body = response.text().await.unwrap_or_default();
            Err(self.map_status_error(status, &error_body))
        }
    }

    /// Maps a reqwest error to a ProviderError.
    fn map_reqwest_error(&self, error: reqwest::Error) -> ProviderError {
        if error.is_timeout() {
            ProviderError::timeout("Request timed out")
        } else if error.is_connect() {
            ProviderError::connection(format!("Connection failed: {}", error))
        } else {
            ProviderError::connection(format!("HTTP request failed: {}", error))
        }
    }

    /// Maps an HTTP status code to a ProviderError.
    fn map_status_error(&self, status: StatusCode, body: &str) -> ProviderError {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                ProviderError::authentication(format!("Authentication failed: {}", body))
            }
            StatusCode::TOO_MANY_REQUESTS => ProviderError::rate_limited("Rate limit exceeded"),
            StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT => {
                ProviderError::connection(format!("Server error ({}): {}", status, body))
            }
            _ => ProviderError::protocol(format!("HTTP error ({}): {}", status, body)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Deserialize)]
    struct Payload {
        value: u32,
    }

    fn url(server: &MockServer, p: &str) -> Url {
        Url::parse(&format!("{}{}", server.uri(), p)).unwrap()
    }

    #[test]
    fn new_client() {
        let client = HttpClient::new(5000);
        assert!(client.is_ok());
        assert_eq!(client.unwrap().timeout_ms(), 5000);
    }

    #[tokio::test]
    async fn get_optional_parses_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"value": 7})))
            .mount(&server)
            .await;

        let client = HttpClient::new(1000).unwrap();
        let payload: Option<Payload> = client.get_optional(url(&server, "/ok"), None).await.unwrap();
        assert_eq!(payload.unwrap().value, 7);
    }

    #[tokio::test]
    async fn get_optional_maps_404_to_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = HttpClient::new(1000).unwrap();
        let payload: Option<Payload> = client
            .get_optional(url(&server, "/missing"), None)
            .await
            .unwrap();
        assert!(payload.is_none());
    }

    #[tokio::test]
    async fn server_error_is_connection_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("down"))
            .mount(&server)
            .await;

        let client = HttpClient::new(1000).unwrap();
        let result: ProviderResult<Option<Payload>> =
            client.get_optional(url(&server, "/x"), None).await;
        assert!(matches!(result, Err(ProviderError::Connection { .. })));
    }

    #[tokio::test]
    async fn invalid_json_is_protocol_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = HttpClient::new(1000).unwrap();
        let result: ProviderResult<Option<Payload>> =
            client.get_optional(url(&server, "/x"), None).await;
        assert!(matches!(result, Err(ProviderError::Protocol { .. })));
    }

    #[tokio::test]
    async fn per_request_timeout_applies() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"value": 1}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let client = HttpClient::new(5000).unwrap();
        let result: ProviderResult<Option<Payload>> = client
            .get_optional(url(&server, "/slow"), Some(Duration::from_millis(50)))
            .await;
        assert!(matches!(result, Err(ProviderError::Timeout { .. })));
    }
}
