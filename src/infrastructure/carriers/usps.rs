//! # USPS Adapter
//!
//! Carrier integration for the USPS shipping options API.
//!
//! Authenticates with an OAuth2 client-credentials grant (credentials in
//! the form body), posts one options-search request per package, and maps
//! the returned `mailClass` values into normalized quotes.

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
use tracing::debug;

/// Production API base URL.
const PRODUCTION_BASE_URL: &str = "https://apis.usps.com";

/// Known `mailClass` values and their display names.
const MAIL_CLASS_NAMES: &[(&str, &str)] = &[
    ("FIRST_CLASS_MAIL", "First-Class Mail"),
    ("FIRST-CLASS_PACKAGE_SERVICE", "First-Class Package Service"),
    ("PRIORITY_MAIL", "Priority Mail"),
    ("PRIORITY_MAIL_EXPRESS", "Priority Mail Express"),
    ("USPS_GROUND_ADVANTAGE", "Ground Advantage"),
    ("PARCEL_SELECT", "Parcel Select"),
    ("MEDIA_MAIL", "Media Mail"),
    ("LIBRARY_MAIL", "Library Mail"),
];

/// Static fallback catalog served when live lookups are unavailable.
const FALLBACK_SERVICES: &[(&str, &str)] = &[
    ("First-Class Mail", "FIRST_CLASS_MAIL"),
    ("Priority Mail", "PRIORITY_MAIL"),
    ("Priority Mail Express", "PRIORITY_MAIL_EXPRESS"),
    ("Ground Advantage", "GROUND_ADVANTAGE"),
];

/// USPS endpoint set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UspsEndpoints {
    token_url: String,
    options_url: String,
}

impl UspsEndpoints {
    /// Builds the endpoint set from an API base URL (production, sandbox,
    /// or a test server).
    #[must_use]
    pub fn from_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            token_url: format!("{}/oauth2/v3/token", base),
            options_url: format!("{}/shipments/v3/options/search", base),
        }
    }

    /// Returns the token endpoint URL.
    #[inline]
    #[must_use]
    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// Returns the options-search endpoint URL.
    #[inline]
    #[must_use]
    pub fn options_url(&self) -> &str {
        &self.options_url
    }
}

impl Default for UspsEndpoints {
    fn default() -> Self {
        Self::from_base_url(PRODUCTION_BASE_URL)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UspsOptionsRequest {
    #[serde(rename = "originZIPCode")]
    origin_zip_code: String,
    #[serde(rename = "destinationZIPCode")]
    destination_zip_code: String,
    weight: f64,
    length: f64,
    width: f64,
    height: f64,
    mail_classes: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UspsOptionsResponse {
    #[serde(default)]
    pricing_options: Vec<UspsPricingOption>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UspsPricingOption {
    #[serde(default)]
    shipping_options: Vec<UspsShippingOption>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UspsShippingOption {
    mail_class: String,
}

/// USPS carrier adapter.
#[derive(Debug)]
pub struct UspsAdapter {
    credentials: Option<ClientCredentials>,
    endpoints: UspsEndpoints,
    http: HttpClient,
}

impl UspsAdapter {
    /// Creates a USPS adapter.
    ///
    /// # Errors
    ///
    /// Returns `CarrierError::Internal` if the HTTP client cannot be built.
    pub fn new(
        credentials: Option<ClientCredentials>,
        endpoints: UspsEndpoints,
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
            .ok_or_else(|| CarrierError::missing_credentials(Carrier::Usps))?;

        oauth::request_token(
            &self.http,
            self.endpoints.token_url(),
            credentials,
            GrantStyle::FormBody,
            HeaderMap::new(),
        )
        .await
    }

    fn build_request(package: &Package) -> UspsOptionsRequest {
        let (length, width, height) = package.dimensions_in();
        UspsOptionsRequest {
            origin_zip_code: package.origin_zip().to_string(),
            destination_zip_code: package.destination_zip().to_string(),
            weight: package.weight_lb(),
            length,
            width,
            height,
            mail_classes: vec!["ALL".to_string()],
        }
    }

    fn map_mail_class(mail_class: &str) -> ServiceQuote {
        match MAIL_CLASS_NAMES
            .iter()
            .find(|(code, _)| *code == mail_class)
        {
            Some((_, name)) => ServiceQuote::new(Carrier::Usps, *name, mail_class),
            None => ServiceQuote::new(
                Carrier::Usps,
                format!("Unknown ({})", mail_class),
                mail_class,
            ),
        }
    }
}

#[async_trait]
impl CarrierAdapter for UspsAdapter {
    fn carrier(&self) -> Carrier {
        Carrier::Usps
    }

    fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    async fn fetch_services(&self, package: &Package) -> CarrierResult<Vec<ServiceQuote>> {
        let token = self.authenticate().await?;
        let headers = HttpClient::bearer_headers(&token)?;
        let request = Self::build_request(package);

        debug!(package = %package, "requesting USPS shipping options");

        let response: UspsOptionsResponse = self
            .http
            .post_json(self.endpoints.options_url(), &request, headers)
            .await?;

        Ok(response
            .pricing_options
            .into_iter()
            .flat_map(|option| option.shipping_options)
            .map(|option| Self::map_mail_class(&option.mail_class))
            .collect())
    }

    fn fallback_services(&self) -> Vec<ServiceQuote> {
        FALLBACK_SERVICES
            .iter()
            .map(|(service, code)| ServiceQuote::new(Carrier::Usps, *service, code))
            .collect()
    }
}
