//! # Carrier Integrations
//!
//! Adapters for the USPS, UPS, and FedEx rating APIs.
//!
//! ## Available Adapters
//!
//! - [`UspsAdapter`]: USPS shipping options search
//! - [`UpsAdapter`]: UPS `Shop` rating with merchant-id auth
//! - [`FedexAdapter`]: FedEx rate quotes with account-number payloads
//!
//! Every adapter implements [`CarrierAdapter`]: OAuth2 client-credentials
//! authentication per call, unit conversion to inches/pounds, response
//! normalization into [`ServiceQuote`](crate::domain::entities::ServiceQuote),
//! and a fixed 4-entry fallback catalog the aggregation layer substitutes
//! on any failure.

pub mod error;
pub mod fedex;
pub mod http_client;
pub mod oauth;
pub mod traits;
pub mod ups;
pub mod usps;

pub use error::{CarrierError, CarrierResult};
pub use fedex::{FedexAdapter, FedexCredentials, FedexEndpoints};
pub use http_client::HttpClient;
pub use oauth::{ClientCredentials, GrantStyle, TokenResponse};
pub use traits::{CarrierAdapter, CarrierStatus};
pub use ups::{UpsAdapter, UpsEndpoints};
pub use usps::{UspsAdapter, UspsEndpoints};
