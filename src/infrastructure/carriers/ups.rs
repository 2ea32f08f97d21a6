//! # UPS Adapter
//!
//! Carrier integration for the UPS rating API.
//!
//! Authenticates with an OAuth2 client-credentials grant over HTTP basic
//! auth plus the `x-merchant-id` header UPS derives from the client ID,
//! posts one `Shop` rating request per package, and maps the numeric
//! service codes into normalized quotes.

use crate::domain::entities::package::Package;
use crate::domain::entities::service_quote::ServiceQuote;
use crate::domain::value_objects::Carrier;
use crate::infrastructure::carriers::error::{CarrierError, CarrierResult};
use crate::infrastructure::carriers::http_client::HttpClient;
use crate::infrastructure::carriers::oauth::{self, ClientCredentials, GrantStyle};
use crate::infrastructure::carriers::traits::CarrierAdapter;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Production API base URL.
const PRODUCTION_BASE_URL: &str = "https://onlinetools.ups.com";

/// Known UPS service codes and their display names.
const SERVICE_NAMES: &[(&str, &str)] = &[
    ("01", "Next Day Air"),
    ("02", "2nd Day Air"),
    ("03", "Ground"),
    ("12", "3 Day Select"),
    ("13", "Next Day Air Saver"),
    ("14", "Next Day Air Early"),
    ("59", "2nd Day Air A.M."),
    ("65", "UPS Saver"),
];

/// Static fallback catalog served when live lookups are unavailable.
const FALLBACK_SERVICES: &[(&str, &str)] = &[
    ("Ground", "03"),
    ("3 Day Select", "12"),
    ("2nd Day Air", "02"),
    ("Next Day Air", "01"),
];

/// UPS endpoint set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsEndpoints {
    token_url: String,
    rating_url: String,
}

impl UpsEndpoints {
    /// Builds the endpoint set from an API base URL (production, sandbox,
    /// or a test server).
    #[must_use]
    pub fn from_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            token_url: format!("{}/security/v1/oauth/token", base),
            rating_url: format!("{}/api/rating/v2403/Shop", base),
        }
    }

    /// Returns the token endpoint URL.
    #[inline]
    #[must_use]
    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// Returns the Shop rating endpoint URL.
    #[inline]
    #[must_use]
    pub fn rating_url(&self) -> &str {
        &self.rating_url
    }
}

impl Default for UpsEndpoints {
    fn default() -> Self {
        Self::from_base_url(PRODUCTION_BASE_URL)
    }
}

// The UPS rating API speaks PascalCase JSON with stringly-typed numbers.

#[derive(Debug, Serialize)]
struct UpsRateRequest {
    #[serde(rename = "RateRequest")]
    rate_request: UpsRateRequestBody,
}

#[derive(Debug, Serialize)]
struct UpsRateRequestBody {
    #[serde(rename = "Request")]
    request: UpsRequestOption,
    #[serde(rename = "Shipment")]
    shipment: UpsShipment,
}

#[derive(Debug, Serialize)]
struct UpsRequestOption {
    #[serde(rename = "RequestOption")]
    request_option: String,
}

#[derive(Debug, Serialize)]
struct UpsShipment {
    #[serde(rename = "Shipper")]
    shipper: UpsParty,
    #[serde(rename = "ShipTo")]
    ship_to: UpsParty,
    #[serde(rename = "Package")]
    package: UpsPackage,
}

#[derive(Debug, Serialize)]
struct UpsParty {
    #[serde(rename = "Address")]
    address: UpsAddress,
}

#[derive(Debug, Serialize)]
struct UpsAddress {
    #[serde(rename = "PostalCode")]
    postal_code: String,
    #[serde(rename = "CountryCode")]
    country_code: String,
}

#[derive(Debug, Serialize)]
struct UpsPackage {
    #[serde(rename = "PackagingType")]
    packaging_type: UpsCode,
    #[serde(rename = "Dimensions")]
    dimensions: UpsDimensions,
    #[serde(rename = "PackageWeight")]
    package_weight: UpsPackageWeight,
}

#[derive(Debug, Serialize, Deserialize)]
struct UpsCode {
    #[serde(rename = "Code")]
    code: String,
}

#[derive(Debug, Serialize)]
struct UpsDimensions {
    #[serde(rename = "UnitOfMeasurement")]
    unit_of_measurement: UpsCode,
    #[serde(rename = "Length")]
    length: String,
    #[serde(rename = "Width")]
    width: String,
    #[serde(rename = "Height")]
    height: String,
}

#[derive(Debug, Serialize)]
struct UpsPackageWeight {
    #[serde(rename = "UnitOfMeasurement")]
    unit_of_measurement: UpsCode,
    #[serde(rename = "Weight")]
    weight: String,
}

#[derive(Debug, Deserialize)]
struct UpsRateResponse {
    #[serde(rename = "RateResponse")]
    rate_response: UpsRateResponseBody,
}

#[derive(Debug, Deserialize)]
struct UpsRateResponseBody {
    #[serde(rename = "RatedShipment", default)]
    rated_shipments: Vec<UpsRatedShipment>,
}

#[derive(Debug, Deserialize)]
struct UpsRatedShipment {
    #[serde(rename = "Service")]
    service: UpsCode,
}

/// UPS carrier adapter.
#[derive(Debug)]
pub struct UpsAdapter {
    credentials: Option<ClientCredentials>,
    endpoints: UpsEndpoints,
    http: HttpClient,
}

impl UpsAdapter {
    /// Creates a UPS adapter.
    ///
    /// # Errors
    ///
    /// Returns `CarrierError::Internal` if the HTTP client cannot be built.
    pub fn new(
        credentials: Option<ClientCredentials>,
        endpoints: UpsEndpoints,
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
    /// Returns `CarrierError::MissingCredentials` if no credential pair is
    /// configured, or a transport/authentication error from the token
    /// endpoint.
    async fn authenticate(&self) -> CarrierResult<String> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or_else(|| CarrierError::missing_credentials(Carrier::Ups))?;

        let mut headers = HeaderMap::new();
        let merchant_id = HeaderValue::from_str(credentials.client_id())
            .map_err(|e| CarrierError::internal(format!("invalid merchant id: {}", e)))?;
        headers.insert("x-merchant-id", merchant_id);

        oauth::request_token(
            &self.http,
            self.endpoints.token_url(),
            credentials,
            GrantStyle::BasicAuth,
            headers,
        )
        .await
    }

    fn build_request(package: &Package) -> UpsRateRequest {
        let (length, width, height) = package.dimensions_in();
        UpsRateRequest {
            rate_request: UpsRateRequestBody {
                request: UpsRequestOption {
                    request_option: "Shop".to_string(),
                },
                shipment: UpsShipment {
                    shipper: UpsParty {
                        address: UpsAddress {
                            postal_code: package.origin_zip().to_string(),
                            country_code: "US".to_string(),
                        },
                    },
                    ship_to: UpsParty {
                        address: UpsAddress {
                            postal_code: package.destination_zip().to_string(),
                            country_code: "US".to_string(),
                        },
                    },
                    package: UpsPackage {
                        packaging_type: UpsCode {
                            code: "02".to_string(),
                        },
                        dimensions: UpsDimensions {
                            unit_of_measurement: UpsCode {
                                code: "IN".to_string(),
                            },
                            length: length.to_string(),
                            width: width.to_string(),
                            height: height.to_string(),
                        },
                        package_weight: UpsPackageWeight {
                            unit_of_measurement: UpsCode {
                                code: "LBS".to_string(),
                            },
                            weight: package.weight_lb().to_string(),
                        },
                    },
                },
            },
        }
    }

    fn map_service_code(code: &str) -> ServiceQuote {
        match SERVICE_NAMES.iter().find(|(known, _)| *known == code) {
            Some((_, name)) => ServiceQuote::new(Carrier::Ups, *name, code),
            None => ServiceQuote::new(Carrier::Ups, format!("Unknown ({})", code), code),
        }
    }
}

#[async_trait]
impl CarrierAdapter for UpsAdapter {
    fn carrier(&self) -> Carrier {
        Carrier::Ups
    }

    fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    async fn fetch_services(&self, package: &Package) -> CarrierResult<Vec<ServiceQuote>> {
        let token = self.authenticate().await?;
        let headers = HttpClient::bearer_headers(&token)?;
        let request = Self::build_request(package);

        debug!(package = %package, "requesting UPS Shop rates");

        let response: UpsRateResponse = self
            .http
            .post_json(self.endpoints.rating_url(), &request, headers)
            .await?;

        Ok(response
            .rate_response
            .rated_shipments
            .into_iter()
            .map(|shipment| Self::map_service_code(&shipment.service.code))
            .collect())
    }

    fn fallback_services(&self) -> Vec<ServiceQuote> {
        FALLBACK_SERVICES
            .iter()
            .map(|(service, code)| ServiceQuote::new(Carrier::Ups, *service, code))
            .collect()
    }
}
