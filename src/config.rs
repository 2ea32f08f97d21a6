//! # Configuration
//!
//! Environment-driven settings for the service.
//!
//! Credential pairs are optional: a missing pair puts the corresponding
//! carrier into fallback-only mode rather than failing startup. Base-URL
//! overrides exist for the carrier sandboxes and for tests.
//!
//! Recognized environment variables:
//!
//! - `BIND_ADDR` (default `0.0.0.0:3000`)
//! - `REQUEST_TIMEOUT_MS` (default `10000`), `OVERALL_TIMEOUT_MS`
//!   (default `30000`)
//! - `USPS_CLIENT_ID` / `USPS_CLIENT_SECRET` / `USPS_BASE_URL`
//! - `UPS_CLIENT_ID` / `UPS_CLIENT_SECRET` / `UPS_BASE_URL`
//! - `FEDEX_API_KEY` / `FEDEX_SECRET_KEY` / `FEDEX_ACCOUNT_NUMBER` /
//!   `FEDEX_BASE_URL`

use crate::infrastructure::carriers::fedex::FedexCredentials;
use crate::infrastructure::carriers::oauth::ClientCredentials;
use ::config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Service settings loaded from the environment.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: String,
    /// Per-carrier HTTP timeout in milliseconds.
    pub request_timeout_ms: u64,
    /// Overall aggregation timeout in milliseconds.
    pub overall_timeout_ms: u64,
    /// USPS OAuth client ID.
    pub usps_client_id: Option<String>,
    /// USPS OAuth client secret.
    pub usps_client_secret: Option<String>,
    /// USPS API base URL override.
    pub usps_base_url: Option<String>,
    /// UPS OAuth client ID.
    pub ups_client_id: Option<String>,
    /// UPS OAuth client secret.
    pub ups_client_secret: Option<String>,
    /// UPS API base URL override.
    pub ups_base_url: Option<String>,
    /// FedEx API key.
    pub fedex_api_key: Option<String>,
    /// FedEx secret key.
    pub fedex_secret_key: Option<String>,
    /// FedEx billing account number.
    pub fedex_account_number: Option<String>,
    /// FedEx API base URL override.
    pub fedex_base_url: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            request_timeout_ms: 10000,
            overall_timeout_ms: 30000,
            usps_client_id: None,
            usps_client_secret: None,
            usps_base_url: None,
            ups_client_id: None,
            ups_client_secret: None,
            ups_base_url: None,
            fedex_api_key: None,
            fedex_secret_key: None,
            fedex_account_number: None,
            fedex_base_url: None,
        }
    }
}

impl Settings {
    /// Loads settings from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a present variable cannot be deserialized
    /// into its field type (e.g. a non-numeric timeout).
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_source(Environment::default())
    }

    fn from_source(source: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()
    }

    /// Returns the USPS credential pair if both halves are configured.
    #[must_use]
    pub fn usps_credentials(&self) -> Option<ClientCredentials> {
        match (&self.usps_client_id, &self.usps_client_secret) {
            (Some(id), Some(secret)) => Some(ClientCredentials::new(id.clone(), secret.clone())),
            _ => None,
        }
    }

    /// Returns the UPS credential pair if both halves are configured.
    #[must_use]
    pub fn ups_credentials(&self) -> Option<ClientCredentials> {
        match (&self.ups_client_id, &self.ups_client_secret) {
            (Some(id), Some(secret)) => Some(ClientCredentials::new(id.clone(), secret.clone())),
            _ => None,
        }
    }

    /// Returns the FedEx credential triple if every part is configured.
    #[must_use]
    pub fn fedex_credentials(&self) -> Option<FedexCredentials> {
        match (
            &self.fedex_api_key,
            &self.fedex_secret_key,
            &self.fedex_account_number,
        ) {
            (Some(key), Some(secret), Some(account)) => Some(FedexCredentials::new(
                key.clone(),
                secret.clone(),
                account.clone(),
            )),
            _ => None,
        }
    }
}
