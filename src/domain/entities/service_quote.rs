//! # Service Quote Entity
//!
//! Normalized description of one available shipping service.
//!
//! This module provides [`ServiceQuote`], the common shape every carrier
//! response is mapped into: the provider, a human-readable service name,
//! and a provider-prefixed machine code. Quotes carry no price; the
//! aggregator only enumerates which services are available.
//!
//! # Examples
//!
//! ```
//! use rateshop::domain::entities::service_quote::ServiceQuote;
//! use rateshop::domain::value_objects::Carrier;
//!
//! let quote = ServiceQuote::new(Carrier::Usps, "Priority Mail", "PRIORITY_MAIL");
//! assert_eq!(quote.code(), "usps_PRIORITY_MAIL");
//! ```

use crate::domain::value_objects::Carrier;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A normalized `{provider, service, code}` record describing one available
/// shipping service.
///
/// Value equality (and `Hash`) covers all three fields; the aggregator uses
/// it to deduplicate identical quotes produced by different packages.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceQuote {
    provider: Carrier,
    service: String,
    code: String,
}

impl ServiceQuote {
    /// Creates a quote, building the machine code from the carrier prefix
    /// and the carrier-specific suffix, e.g. `usps` plus `PRIORITY_MAIL`
    /// yields `usps_PRIORITY_MAIL`.
    #[must_use]
    pub fn new(provider: Carrier, service: impl Into<String>, code_suffix: &str) -> Self {
        Self {
            provider,
            service: service.into(),
            code: format!("{}_{}", provider.code_prefix(), code_suffix),
        }
    }

    /// Returns the provider.
    #[inline]
    #[must_use]
    pub fn provider(&self) -> Carrier {
        self.provider
    }

    /// Returns the human-readable service name.
    #[inline]
    #[must_use]
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Returns the provider-prefixed machine code.
    #[inline]
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }
}

impl fmt::Display for ServiceQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.provider, self.service, self.code)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn code_is_provider_prefixed() {
        let quote = ServiceQuote::new(Carrier::Ups, "Ground", "03");
        assert_eq!(quote.code(), "ups_03");
        assert_eq!(quote.service(), "Ground");
        assert_eq!(quote.provider(), Carrier::Ups);
    }

    #[test]
    fn value_equality() {
        let a = ServiceQuote::new(Carrier::Usps, "Priority Mail", "PRIORITY_MAIL");
        let b = ServiceQuote::new(Carrier::Usps, "Priority Mail", "PRIORITY_MAIL");
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn serialize_shape() {
        let quote = ServiceQuote::new(Carrier::FedEx, "FedEx Ground", "FEDEX_GROUND");
        let json = serde_json::to_value(&quote).unwrap();
        assert_eq!(json["provider"], "FedEx");
        assert_eq!(json["service"], "FedEx Ground");
        assert_eq!(json["code"], "fedex_FEDEX_GROUND");
    }

    #[test]
    fn display() {
        let quote = ServiceQuote::new(Carrier::Usps, "Ground Advantage", "GROUND_ADVANTAGE");
        let display = quote.to_string();
        assert!(display.contains("USPS"));
        assert!(display.contains("usps_GROUND_ADVANTAGE"));
    }
}
