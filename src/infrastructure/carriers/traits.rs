//! # Carrier Adapter Trait
//!
//! Port definition for carrier integrations.
//!
//! This module defines the [`CarrierAdapter`] trait that every carrier
//! integration implements. The contract is deliberately explicit about
//! failure: `fetch_services` returns a `Result`, and the aggregation layer
//! decides whether to substitute the static fallback catalog. Adapters
//! never swallow their own errors.

use crate::domain::entities::package::Package;
use crate::domain::entities::service_quote::ServiceQuote;
use crate::domain::value_objects::Carrier;
use crate::infrastructure::carriers::error::CarrierResult;
use async_trait::async_trait;
use serde::Serialize;
use std::fmt;

/// Configuration state of one carrier, reported by the health endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CarrierStatus {
    carrier: Carrier,
    configured: bool,
}

impl CarrierStatus {
    /// Creates a status record.
    #[must_use]
    pub fn new(carrier: Carrier, configured: bool) -> Self {
        Self {
            carrier,
            configured,
        }
    }

    /// Returns the carrier.
    #[inline]
    #[must_use]
    pub fn carrier(&self) -> Carrier {
        self.carrier
    }

    /// Returns true if the carrier has credentials configured.
    #[inline]
    #[must_use]
    pub fn configured(&self) -> bool {
        self.configured
    }
}

impl fmt::Display for CarrierStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}",
            self.carrier,
            if self.configured {
                "configured"
            } else {
                "fallback-only"
            }
        )
    }
}

/// Trait defining the interface for carrier adapters.
///
/// # Error Handling
///
/// `fetch_services` returns `CarrierResult<Vec<ServiceQuote>>`. Missing
/// credentials surface as `CarrierError::MissingCredentials` rather than a
/// silent fallback, so callers can distinguish live data from degraded
/// data.
#[async_trait]
pub trait CarrierAdapter: Send + Sync + fmt::Debug {
    /// Returns the carrier this adapter integrates.
    fn carrier(&self) -> Carrier;

    /// Returns true if credentials are configured for live lookups.
    fn is_configured(&self) -> bool;

    /// Fetches the carrier's applicable services for one package.
    ///
    /// # Errors
    ///
    /// - `CarrierError::MissingCredentials` - no credential pair configured
    /// - `CarrierError::Timeout` / `Connection` - transport failure
    /// - `CarrierError::Authentication` - token request rejected
    /// - `CarrierError::Protocol` - malformed response body
    async fn fetch_services(&self, package: &Package) -> CarrierResult<Vec<ServiceQuote>>;

    /// Returns the fixed fallback catalog for this carrier, used when a
    /// live lookup is unavailable or fails.
    fn fallback_services(&self) -> Vec<ServiceQuote>;

    /// Returns the configuration status for health reporting.
    fn status(&self) -> CarrierStatus {
        CarrierStatus::new(self.carrier(), self.is_configured())
    }
}
