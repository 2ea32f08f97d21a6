//! # FedEx Adapter
//!
//! Carrier integration for the FedEx rate API.
//!
//! Authenticates with an OAuth2 client-credentials grant (API key and
//! secret in the form body), posts one rate-quote request per package with
//! the configured account number, and maps the returned `serviceType`
//! values into normalized quotes.

use crate::domain::entities::package::Package;
use crate::domain::entities::service_quote::ServiceQuote;
use crate::domain::value_objects::Carrier;
use crate::infrastructure::carriers::error::{CarrierError, CarrierResult};
use crate::infrastructure::carriers::http_client::HttpClient;
use crate::infrastructure::carriers::oauth::{self, ClientCredentials, GrantStyle};
use crate::infrastructure::carriers::traits::CarrierAdapter;
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Production API base URL.
const PRODUCTION_BASE_URL: &str = "https://apis.fedex.com";

/// Known `serviceType` values and their display names.
const SERVICE_NAMES: &[(&str, &str)] = &[
    ("FEDEX_GROUND", "FedEx Ground"),
    ("GROUND_HOME_DELIVERY", "FedEx Home Delivery"),
    ("FEDEX_EXPRESS_SAVER", "FedEx Express Saver"),
    ("FEDEX_2_DAY", "FedEx 2Day"),
    ("FEDEX_2_DAY_AM", "FedEx 2Day A.M."),
    ("STANDARD_OVERNIGHT", "FedEx Standard Overnight"),
    ("PRIORITY_OVERNIGHT", "FedEx Priority Overnight"),
    ("FIRST_OVERNIGHT", "FedEx First Overnight"),
];

/// Static fallback catalog served when live lookups are unavailable.
const FALLBACK_SERVICES: &[(&str, &str)] = &[
    ("FedEx Ground", "FEDEX_GROUND"),
    ("FedEx Express Saver", "FEDEX_EXPRESS_SAVER"),
    ("FedEx 2Day", "FEDEX_2_DAY"),
    ("FedEx Standard Overnight", "STANDARD_OVERNIGHT"),
];

/// FedEx credentials: OAuth pair plus the billing account number the rate
/// API requires in every request body.
#[derive(Clone, PartialEq, Eq)]
pub struct FedexCredentials {
    oauth: ClientCredentials,
    account_number: String,
}

impl FedexCredentials {
    /// Creates the credential triple.
    #[must_use]
    pub fn new(
        api_key: impl Into<String>,
        secret_key: impl Into<String>,
        account_number: impl Into<String>,
    ) -> Self {
        Self {
            oauth: ClientCredentials::new(api_key, secret_key),
            account_number: account_number.into(),
        }
    }

    /// Returns the OAuth credential pair.
    #[inline]
    #[must_use]
    pub fn oauth(&self) -> &ClientCredentials {
        &self.oauth
    }

    /// Returns the billing account number.
    #[inline]
    #[must_use]
    pub fn account_number(&self) -> &str {
        &self.account_number
    }
}

impl fmt::Debug for FedexCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FedexCredentials")
            .field("oauth", &self.oauth)
            .field("account_number", &"***")
            .finish()
    }
}

/// FedEx endpoint set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FedexEndpoints {
    token_url: String,
    rates_url: String,
}

impl FedexEndpoints {
    /// Builds the endpoint set from an API base URL (production, sandbox,
    /// or a test server).
    #[must_use]
    pub fn from_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            token_url: format!("{}/oauth/token", base),
            rates_url: format!("{}/rate/v1/rates/quotes", base),
        }
    }

    /// Returns the token endpoint URL.
    #[inline]
    #[must_use]
    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// Returns the rate-quotes endpoint URL.
    #[inline]
    #[must_use]
    pub fn rates_url(&self) -> &str {
        &self.rates_url
    }
}

impl Default for FedexEndpoints {
    fn default() -> Self {
        Self::from_base_url(PRODUCTION_BASE_URL)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FedexRateRequest {
    account_number: FedexAccountNumber,
    requested_shipment: FedexRequestedShipment,
}

#[derive(Debug, Serialize)]
struct FedexAccountNumber {
    value: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FedexRequestedShipment {
    shipper: FedexParty,
    recipient: FedexParty,
    pickup_type: String,
    rate_request_type: Vec<String>,
    requested_package_line_items: Vec<FedexPackageLineItem>,
}

#[derive(Debug, Serialize)]
struct FedexParty {
    address: FedexAddress,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FedexAddress {
    postal_code: String,
    country_code: String,
}

#[derive(Debug, Serialize)]
struct FedexPackageLineItem {
    weight: FedexWeight,
    dimensions: FedexDimensions,
}

#[derive(Debug, Serialize)]
struct FedexWeight {
    units: String,
    value: f64,
}

#[derive(Debug, Serialize)]
struct FedexDimensions {
    length: f64,
    width: f64,
    height: f64,
    units: String,
}

#[derive(Debug, Deserialize, Default)]
struct FedexRateResponse {
    #[serde(default)]
    output: FedexRateOutput,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct FedexRateOutput {
    #[serde(default)]
    rate_reply_details: Vec<FedexRateReplyDetail>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FedexRateReplyDetail {
    service_type: String,
    #[serde(default)]
    service_name: Option<String>,
}

/// FedEx carrier adapter.
#[derive(Debug)]
pub struct FedexAdapter {
    credentials: Option<FedexCredentials>,
    endpoints: FedexEndpoints,
    http: HttpClient,
}

impl FedexAdapter {
    /// Creates a FedEx adapter.
    ///
    /// # Errors
    ///
    /// Returns `CarrierError::Internal` if the HTTP client cannot be built.
    pub fn new(
        credentials: Option<FedexCredentials>,
        endpoints: FedexEndpoints,
        timeout_ms: u64,
    ) -> CarrierResult<Self> {
        Ok(Self {
            credentials,
            endpoints,
            http: HttpClient::new(timeout_ms)?,
        })
    }

    /// Obtains a bearer token for one outbound call.
    ///
    /// # Errors
    ///
    /// Returns `CarrierError::MissingCredentials` if no credential triple
    /// is configured, or a transport/authentication error from the token
    /// endpoint.
    async fn authenticate(&self) -> CarrierResult<String> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or_else(|| CarrierError::missing_credentials(Carrier::FedEx))?;

        oauth::request_token(
            &self.http,
            self.endpoints.token_url(),
            credentials.oauth(),
            GrantStyle::FormBody,
            HeaderMap::new(),
        )
        .await
    }

    fn build_request(package: &Package, account_number: &str) -> FedexRateRequest {
        let (length, width, height) = package.dimensions_in();
        FedexRateRequest {
            account_number: FedexAccountNumber {
                value: account_number.to_string(),
            },
            requested_shipment: FedexRequestedShipment {
                shipper: FedexParty {
                    address: FedexAddress {
                        postal_code: package.origin_zip().to_string(),
                        country_code: "US".to_string(),
                    },
                },
                recipient: FedexParty {
                    address: FedexAddress {
                        postal_code: package.destination_zip().to_string(),
                        country_code: "US".to_string(),
                    },
                },
                pickup_type: "DROPOFF_AT_FEDEX_LOCATION".to_string(),
                rate_request_type: vec!["LIST".to_string()],
                requested_package_line_items: vec![FedexPackageLineItem {
                    weight: FedexWeight {
                        units: "LB".to_string(),
                        value: package.weight_lb(),
                    },
                    dimensions: FedexDimensions {
                        length,
                        width,
                        height,
                        units: "IN".to_string(),
                    },
                }],
            },
        }
    }

    fn map_service(detail: &FedexRateReplyDetail) -> ServiceQuote {
        if let Some((_, name)) = SERVICE_NAMES
            .iter()
            .find(|(code, _)| *code == detail.service_type)
        {
            return ServiceQuote::new(Carrier::FedEx, *name, &detail.service_type);
        }

        match detail.service_name.as_deref() {
            Some(name) if !name.is_empty() => {
                ServiceQuote::new(Carrier::FedEx, name, &detail.service_type)
            }
            _ => ServiceQuote::new(
                Carrier::FedEx,
                format!("Unknown ({})", detail.service_type),
                &detail.service_type,
            ),
        }
    }
}

#[async_trait]
impl CarrierAdapter for FedexAdapter {
    fn carrier(&self) -> Carrier {
        Carrier::FedEx
    }

    fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    async fn fetch_services(&self, package: &Package) -> CarrierResult<Vec<ServiceQuote>> {
        let token = self.authenticate().await?;
        let headers = HttpClient::bearer_headers(&token)?;

        let account_number = self
            .credentials
            .as_ref()
            .map(|c| c.account_number().to_string())
            .ok_or_else(|| CarrierError::missing_credentials(Carrier::FedEx))?;
        let request = Self::build_request(package, &account_number);

        debug!(package = %package, "requesting FedEx rate quotes");

        let response: FedexRateResponse = self
            .http
            .post_json(self.endpoints.rates_url(), &request, headers)
            .await?;

        Ok(response
            .output
            .rate_reply_details
            .iter()
            .map(Self::map_service)
            .collect())
    }

    fn fallback_services(&self) -> Vec<ServiceQuote> {
        FALLBACK_SERVICES
            .iter()
            .map(|(service, code)| ServiceQuote::new(Carrier::FedEx, *service, code))
            .collect()
    }
}
