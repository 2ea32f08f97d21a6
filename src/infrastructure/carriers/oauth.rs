//! # OAuth2 Client-Credentials Helper
//!
//! Shared token acquisition for the carrier adapters.
//!
//! All three carriers gate their rating APIs behind an OAuth2
//! client-credentials grant, differing only in how the credentials travel:
//! USPS and FedEx take them in the form body, UPS takes HTTP basic auth
//! plus an `x-merchant-id` header. Tokens are request-scoped; each rate
//! lookup re-authenticates and nothing is cached across requests.

use crate::infrastructure::carriers::error::{CarrierError, CarrierResult};
use crate::infrastructure::carriers::http_client::HttpClient;
use reqwest::header::HeaderMap;
use serde::Deserialize;
use std::fmt;

/// An OAuth2 client ID/secret pair.
///
/// `Debug` redacts the secret so credential structs can appear in adapter
/// `Debug` output and tracing fields safely.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientCredentials {
    client_id: String,
    client_secret: String,
}

impl ClientCredentials {
    /// Creates a credential pair.
    #[must_use]
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Returns the client ID.
    #[inline]
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Returns the client secret.
    #[inline]
    #[must_use]
    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }
}

impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .finish()
    }
}

/// How the credential pair travels in the token request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantStyle {
    /// `client_id`/`client_secret` in the form body (USPS, FedEx).
    FormBody,
    /// HTTP basic auth (UPS).
    BasicAuth,
}

/// Token endpoint response. Only `access_token` is consumed; expiry is
/// irrelevant because tokens are request-scoped.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    /// The opaque bearer token.
    pub access_token: String,
    /// Token type as reported by the endpoint.
    #[serde(default)]
    pub token_type: Option<String>,
    /// Lifetime in seconds as reported by the endpoint.
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// Requests a bearer token via the client-credentials grant.
///
/// # Arguments
///
/// * `http` - The shared HTTP client.
/// * `token_url` - The carrier's token endpoint.
/// * `credentials` - The client ID/secret pair.
/// * `style` - Where the credentials travel.
/// * `extra_headers` - Additional headers (e.g. UPS `x-merchant-id`).
///
/// # Errors
///
/// Returns `CarrierError::Authentication` if the endpoint answers without a
/// usable token, and transport/status errors from the underlying request.
pub async fn request_token(
    http: &HttpClient,
    token_url: &str,
    credentials: &ClientCredentials,
    style: GrantStyle,
    extra_headers: HeaderMap,
) -> CarrierResult<String> {
    let response: TokenResponse = match style {
        GrantStyle::FormBody => {
            let form = [
                ("grant_type", "client_credentials"),
                ("client_id", credentials.client_id()),
                ("client_secret", credentials.client_secret()),
            ];
            http.post_form(token_url, &form, None, extra_headers).await?
        }
        GrantStyle::BasicAuth => {
            let form = [("grant_type", "client_credentials")];
            http.post_form(
                token_url,
                &form,
                Some((credentials.client_id(), credentials.client_secret())),
                extra_headers,
            )
            .await?
        }
    };

    if response.access_token.is_empty() {
        return Err(CarrierError::authentication(
            "token endpoint returned an empty access token",
        ));
    }

    Ok(response.access_token)
}
