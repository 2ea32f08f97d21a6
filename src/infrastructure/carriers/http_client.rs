//! # HTTP Client Utilities
//!
//! Shared HTTP client wrapper for carrier adapters.
//!
//! This module provides a reusable reqwest wrapper with:
//! - An explicit per-request timeout (carrier endpoints are never awaited
//!   on the client library's default socket timeout)
//! - JSON and form-encoded POST support, the two shapes the carrier OAuth
//!   and rating endpoints require
//! - HTTP basic auth for token endpoints that demand it (UPS)
//! - Mapping of transport and status failures into [`CarrierError`]

use crate::infrastructure::carriers::error::{CarrierError, CarrierResult};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client wrapper for carrier adapters.
#[derive(Debug, Clone)]
pub struct HttpClient {
    /// Inner reqwest client.
    client: Client,
    /// Request timeout in milliseconds.
    timeout_ms: u64,
}

impl HttpClient {
    /// Creates a new HTTP client with the specified timeout.
    ///
    /// # Errors
    ///
    /// Returns `CarrierError::Internal` if the client cannot be created.
    pub fn new(timeout_ms: u64) -> CarrierResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| CarrierError::internal(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client, timeout_ms })
    }

    /// Returns the configured timeout in milliseconds.
    #[inline]
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Builds a header map carrying a bearer token.
    ///
    /// # Errors
    ///
    /// Returns `CarrierError::Internal` if the token contains characters
    /// invalid in a header value.
    pub fn bearer_headers(token: &str) -> CarrierResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        let value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| CarrierError::internal(format!("invalid bearer token: {}", e)))?;
        headers.insert(AUTHORIZATION, value);
        Ok(headers)
    }

    /// Makes a POST request with a JSON body and custom headers, and
    /// deserializes the JSON response.
    ///
    /// # Errors
    ///
    /// Returns `CarrierError::Timeout`/`Connection` if the request fails,
    /// a status-mapped error on non-2xx, and `CarrierError::Protocol` if
    /// the response body cannot be parsed.
    pub async fn post_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        url: &str,
        body: &B,
        headers: HeaderMap,
    ) -> CarrierResult<T> {
        let response = self
            .client
            .post(url)
            .headers(headers)
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        self.handle_response(response).await
    }

    /// Makes a POST request with a form-encoded body, optional HTTP basic
    /// auth, and custom headers, and deserializes the JSON response.
    ///
    /// Token endpoints use this shape for the client-credentials grant.
    ///
    /// # Errors
    ///
    /// Returns `CarrierError::Timeout`/`Connection` if the request fails,
    /// a status-mapped error on non-2xx, and `CarrierError::Protocol` if
    /// the response body cannot be parsed.
    pub async fn post_form<T: DeserializeOwned>(
        &self,
        url: &str,
        form: &[(&str, &str)],
        basic_auth: Option<(&str, &str)>,
        headers: HeaderMap,
    ) -> CarrierResult<T> {
        let mut request = self.client.post(url).headers(headers).form(form);

        if let Some((username, password)) = basic_auth {
            request = request.basic_auth(username, Some(password));
        }

        let response = request
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        self.handle_response(response).await
    }

    /// Handles the HTTP response, checking status and deserializing JSON.
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> CarrierResult<T> {
        let status = response.status();

        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| CarrierError::protocol(format!("failed to parse response: {}", e)))
        } else {
            let error_body = response.text().await.unwrap_or_default();
            Err(Self::map_status_error(status, &error_body))
        }
    }

    /// Maps a reqwest error to a CarrierError.
    fn map_reqwest_error(&self, error: reqwest::Error) -> CarrierError {
        if error.is_timeout() {
            CarrierError::timeout_with_duration("request timed out", self.timeout_ms)
        } else if error.is_connect() {
            CarrierError::connection(format!("connection failed: {}", error))
        } else {
            CarrierError::connection(format!("HTTP request failed: {}", error))
        }
    }

    /// Maps an HTTP status code to a CarrierError.
    fn map_status_error(status: StatusCode, body: &str) -> CarrierError {
        match status {
            StatusCode::BAD_REQUEST => {
                CarrierError::invalid_request(format!("bad request: {}", body))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                CarrierError::authentication(format!("authentication failed: {}", body))
            }
            StatusCode::TOO_MANY_REQUESTS => CarrierError::rate_limited("rate limit exceeded"),
            StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT => {
                CarrierError::connection(format!("server error ({}): {}", status, body))
            }
            _ => CarrierError::protocol(format!("HTTP error ({}): {}", status, body)),
        }
    }
}
