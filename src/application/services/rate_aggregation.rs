//! # Rate Aggregation Engine
//!
//! Orchestrates per-carrier service lookups across a batch of packages.
//!
//! This module provides the [`RateAggregationEngine`] which coordinates
//! concurrent lookups against every configured carrier, substitutes each
//! carrier's static fallback catalog when its live call fails, and
//! deduplicates the combined result by value equality.
//!
//! A carrier failure never aborts the batch and never surfaces to the HTTP
//! client; the outcome instead reports `degraded: true` so callers can
//! distinguish live data from fallback data.

use crate::domain::entities::package::{Package, PackageValidationError};
use crate::domain::entities::service_quote::ServiceQuote;
use crate::infrastructure::carriers::traits::CarrierAdapter;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Configuration for rate aggregation.
#[derive(Debug, Clone)]
pub struct AggregationConfig {
    /// Overall timeout for one aggregation call in milliseconds.
    pub overall_timeout_ms: u64,
    /// Per-carrier timeout in milliseconds; a carrier that exceeds it is
    /// treated as failed and its fallback catalog is substituted.
    pub per_carrier_timeout_ms: u64,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            overall_timeout_ms: 30000,
            per_carrier_timeout_ms: 10000,
        }
    }
}

impl AggregationConfig {
    /// Sets the overall timeout.
    #[must_use]
    pub fn with_overall_timeout(mut self, timeout_ms: u64) -> Self {
        self.overall_timeout_ms = timeout_ms;
        self
    }

    /// Sets the per-carrier timeout.
    #[must_use]
    pub fn with_per_carrier_timeout(mut self, timeout_ms: u64) -> Self {
        self.per_carrier_timeout_ms = timeout_ms;
        self
    }
}

/// A package that was dropped from the live-query set, and why.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageWarning {
    /// Zero-based index of the package in the submitted batch.
    pub index: usize,
    /// Human-readable reason the package was skipped.
    pub reason: String,
}

impl PackageWarning {
    /// Creates a warning for the package at `index`.
    #[must_use]
    pub fn new(index: usize, reason: impl Into<String>) -> Self {
        Self {
            index,
            reason: reason.into(),
        }
    }
}

/// Result of one aggregation call.
#[derive(Debug)]
pub struct AggregationOutcome {
    /// Deduplicated services, first-seen order preserved.
    pub services: Vec<ServiceQuote>,
    /// True if any carrier served fallback data instead of live data.
    pub degraded: bool,
    /// Number of carriers queried.
    pub carriers_queried: usize,
    /// Number of carriers whose every lookup succeeded live.
    pub carriers_live: usize,
    /// Packages dropped from the live-query set.
    pub warnings: Vec<PackageWarning>,
}

impl AggregationOutcome {
    /// Returns true if every carrier answered live.
    #[must_use]
    pub fn is_fully_live(&self) -> bool {
        !self.degraded
    }
}

/// Engine for collecting shipping services from all configured carriers.
#[derive(Debug)]
pub struct RateAggregationEngine {
    carriers: Vec<Arc<dyn CarrierAdapter>>,
    config: AggregationConfig,
}

impl RateAggregationEngine {
    /// Creates a new engine.
    #[must_use]
    pub fn new(carriers: Vec<Arc<dyn CarrierAdapter>>, config: AggregationConfig) -> Self {
        Self { carriers, config }
    }

    /// Creates a new engine with default configuration.
    #[must_use]
    pub fn with_defaults(carriers: Vec<Arc<dyn CarrierAdapter>>) -> Self {
        Self::new(carriers, AggregationConfig::default())
    }

    /// Returns the configured carriers.
    #[must_use]
    pub fn carriers(&self) -> &[Arc<dyn CarrierAdapter>] {
        &self.carriers
    }

    /// Returns the current configuration.
    #[must_use]
    pub fn config(&self) -> &AggregationConfig {
        &self.config
    }

    /// Enumerates every carrier's services for the hardcoded reference
    /// package. Used by the static `/services` endpoint.
    pub async fn available_services(&self) -> AggregationOutcome {
        self.aggregate(vec![Package::reference()], Vec::new()).await
    }

    /// Enumerates services across a validated batch.
    ///
    /// Invalid packages contribute nothing to the live-query set but are
    /// reported in the outcome's warnings. A batch with zero valid
    /// packages degrades to the reference-package enumeration, matching
    /// [`available_services`](Self::available_services).
    pub async fn shipping_options(
        &self,
        batch: Vec<Result<Package, PackageValidationError>>,
    ) -> AggregationOutcome {
        let mut packages = Vec::new();
        let mut warnings = Vec::new();

        for (index, entry) in batch.into_iter().enumerate() {
            match entry {
                Ok(package) => packages.push(package),
                Err(error) => warnings.push(PackageWarning::new(index, error.to_string())),
            }
        }

        if packages.is_empty() {
            debug!("no valid packages in batch, quoting reference package");
            packages.push(Package::reference());
        }

        self.aggregate(packages, warnings).await
    }

    async fn aggregate(
        &self,
        packages: Vec<Package>,
        warnings: Vec<PackageWarning>,
    ) -> AggregationOutcome {
        let carriers_queried = self.carriers.len();
        let overall_timeout = Duration::from_millis(self.config.overall_timeout_ms);

        let (services, carriers_live) =
            match timeout(overall_timeout, self.collect(&packages)).await {
                Ok((services, live_flags)) => {
                    let live = live_flags.iter().filter(|flag| **flag).count();
                    (services, live)
                }
                Err(_) => {
                    warn!(
                        timeout_ms = self.config.overall_timeout_ms,
                        "aggregation timed out, serving fallback catalogs"
                    );
                    let services = self
                        .carriers
                        .iter()
                        .flat_map(|carrier| carrier.fallback_services())
                        .collect();
                    (services, 0)
                }
            };

        AggregationOutcome {
            services: dedupe(services),
            degraded: carriers_live < carriers_queried,
            carriers_queried,
            carriers_live,
            warnings,
        }
    }

    /// Queries every carrier for every package concurrently, substituting
    /// fallback catalogs per failed lookup. Returns the raw (un-deduped)
    /// quote list and a per-carrier liveness flag.
    async fn collect(&self, packages: &[Package]) -> (Vec<ServiceQuote>, Vec<bool>) {
        let per_carrier_timeout = Duration::from_millis(self.config.per_carrier_timeout_ms);
        let mut handles = Vec::with_capacity(packages.len() * self.carriers.len());

        for package in packages {
            for (carrier_index, adapter) in self.carriers.iter().enumerate() {
                let adapter = Arc::clone(adapter);
                let package = package.clone();

                let handle = tokio::spawn(async move {
                    match timeout(per_carrier_timeout, adapter.fetch_services(&package)).await {
                        Ok(Ok(services)) => Ok(services),
                        Ok(Err(error)) => Err(error.to_string()),
                        Err(_) => Err("carrier request timed out".to_string()),
                    }
                });

                handles.push((carrier_index, handle));
            }
        }

        let mut services = Vec::new();
        let mut live_flags = vec![true; self.carriers.len()];

        for (carrier_index, handle) in handles {
            let Some(adapter) = self.carriers.get(carrier_index) else {
                continue;
            };

            let failure = match handle.await {
                Ok(Ok(quotes)) => {
                    services.extend(quotes);
                    None
                }
                Ok(Err(error)) => Some(error),
                Err(join_error) => Some(format!("carrier task panicked: {}", join_error)),
            };

            if let Some(error) = failure {
                warn!(
                    carrier = %adapter.carrier(),
                    %error,
                    "live rate lookup failed, substituting fallback catalog"
                );
                services.extend(adapter.fallback_services());
                if let Some(flag) = live_flags.get_mut(carrier_index) {
                    *flag = false;
                }
            }
        }

        (services, live_flags)
    }
}

/// Removes duplicate quotes by value equality, preserving first-seen order.
fn dedupe(services: Vec<ServiceQuote>) -> Vec<ServiceQuote> {
    let mut seen = HashSet::with_capacity(services.len());
    let mut unique = Vec::with_capacity(services.len());

    for quote in services {
        if seen.insert(quote.clone()) {
            unique.push(quote);
        }
    }

    unique
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{Carrier, DimensionUnit, WeightUnit};
    use crate::infrastructure::carriers::error::{CarrierError, CarrierResult};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct MockCarrierAdapter {
        carrier: Carrier,
        live_services: Option<Vec<ServiceQuote>>,
        delay_ms: u64,
        calls: Arc<AtomicUsize>,
    }

    impl MockCarrierAdapter {
        fn live(carrier: Carrier, services: Vec<ServiceQuote>) -> Self {
            Self {
                carrier,
                live_services: Some(services),
                delay_ms: 0,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn failing(carrier: Carrier) -> Self {
            Self {
                carrier,
                live_services: None,
                delay_ms: 0,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn slow(carrier: Carrier, services: Vec<ServiceQuote>, delay_ms: u64) -> Self {
            Self {
                carrier,
                live_services: Some(services),
                delay_ms,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn call_count(&self) -> Arc<AtomicUsize> {
            Arc::clone(&self.calls)
        }
    }

    #[async_trait]
    impl CarrierAdapter for MockCarrierAdapter {
        fn carrier(&self) -> Carrier {
            self.carrier
        }

        fn is_configured(&self) -> bool {
            self.live_services.is_some()
        }

        async fn fetch_services(&self, _package: &Package) -> CarrierResult<Vec<ServiceQuote>> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            if self.delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
            }

            match &self.live_services {
                Some(services) => Ok(services.clone()),
                None => Err(CarrierError::connection("connection refused")),
            }
        }

        fn fallback_services(&self) -> Vec<ServiceQuote> {
            vec![
                ServiceQuote::new(self.carrier, "Fallback Standard", "STANDARD"),
                ServiceQuote::new(self.carrier, "Fallback Express", "EXPRESS"),
            ]
        }
    }

    fn valid_package() -> Package {
        Package::new(
            10.0,
            5.0,
            5.0,
            1.0,
            DimensionUnit::In,
            WeightUnit::Lb,
            None,
            None,
        )
        .unwrap()
    }

    fn invalid_entry() -> Result<Package, PackageValidationError> {
        Err(PackageValidationError::MissingField("weight"))
    }

    fn live_quote(carrier: Carrier, code: &str) -> ServiceQuote {
        ServiceQuote::new(carrier, format!("Live {}", code), code)
    }

    #[tokio::test]
    async fn all_live_not_degraded() {
        let carriers: Vec<Arc<dyn CarrierAdapter>> = vec![
            Arc::new(MockCarrierAdapter::live(
                Carrier::Usps,
                vec![live_quote(Carrier::Usps, "A")],
            )),
            Arc::new(MockCarrierAdapter::live(
                Carrier::Ups,
                vec![live_quote(Carrier::Ups, "B")],
            )),
        ];

        let engine = RateAggregationEngine::with_defaults(carriers);
        let outcome = engine.shipping_options(vec![Ok(valid_package())]).await;

        assert!(outcome.is_fully_live());
        assert_eq!(outcome.carriers_queried, 2);
        assert_eq!(outcome.carriers_live, 2);
        assert_eq!(outcome.services.len(), 2);
        assert!(outcome.warnings.is_empty());
    }

    #[tokio::test]
    async fn failed_carrier_serves_fallback() {
        let failing = MockCarrierAdapter::failing(Carrier::Ups);
        let carriers: Vec<Arc<dyn CarrierAdapter>> = vec![
            Arc::new(MockCarrierAdapter::live(
                Carrier::Usps,
                vec![live_quote(Carrier::Usps, "A")],
            )),
            Arc::new(failing),
        ];

        let engine = RateAggregationEngine::with_defaults(carriers);
        let outcome = engine.shipping_options(vec![Ok(valid_package())]).await;

        assert!(outcome.degraded);
        assert_eq!(outcome.carriers_live, 1);
        // Live USPS quote plus the two UPS fallback entries.
        assert_eq!(outcome.services.len(), 3);
        assert!(outcome
            .services
            .iter()
            .any(|q| q.code() == "ups_STANDARD"));
    }

    #[tokio::test]
    async fn invalid_package_skipped_with_warning() {
        let adapter = MockCarrierAdapter::live(Carrier::Usps, vec![live_quote(Carrier::Usps, "A")]);
        let calls = adapter.call_count();
        let engine = RateAggregationEngine::with_defaults(vec![Arc::new(adapter)]);

        let outcome = engine
            .shipping_options(vec![Ok(valid_package()), invalid_entry()])
            .await;

        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.warnings[0].index, 1);
        assert!(outcome.warnings[0].reason.contains("weight"));
        // Only the valid package was quoted.
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn zero_valid_packages_matches_available_services() {
        let carriers: Vec<Arc<dyn CarrierAdapter>> =
            vec![Arc::new(MockCarrierAdapter::failing(Carrier::FedEx))];
        let engine = RateAggregationEngine::with_defaults(carriers);

        let reference = engine.available_services().await;
        let degraded_batch = engine
            .shipping_options(vec![invalid_entry(), invalid_entry()])
            .await;

        assert_eq!(degraded_batch.services, reference.services);
        assert_eq!(degraded_batch.warnings.len(), 2);
    }

    #[tokio::test]
    async fn duplicate_quotes_collapse() {
        let adapter = MockCarrierAdapter::failing(Carrier::Usps);
        let calls = adapter.call_count();
        let engine = RateAggregationEngine::with_defaults(vec![Arc::new(adapter)]);

        let outcome = engine
            .shipping_options(vec![Ok(valid_package()), Ok(valid_package())])
            .await;

        // Both packages produced the same two fallback entries.
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(outcome.services.len(), 2);
    }

    #[tokio::test]
    async fn slow_carrier_times_out_to_fallback() {
        let carriers: Vec<Arc<dyn CarrierAdapter>> = vec![Arc::new(MockCarrierAdapter::slow(
            Carrier::Ups,
            vec![live_quote(Carrier::Ups, "LIVE")],
            200,
        ))];

        let engine = RateAggregationEngine::new(
            carriers,
            AggregationConfig::default().with_per_carrier_timeout(20),
        );
        let outcome = engine.shipping_options(vec![Ok(valid_package())]).await;

        assert!(outcome.degraded);
        assert_eq!(outcome.carriers_live, 0);
        assert!(outcome.services.iter().all(|q| q.code() != "ups_LIVE"));
    }

    #[tokio::test]
    async fn carrier_order_preserved() {
        let carriers: Vec<Arc<dyn CarrierAdapter>> = vec![
            Arc::new(MockCarrierAdapter::failing(Carrier::Usps)),
            Arc::new(MockCarrierAdapter::failing(Carrier::Ups)),
            Arc::new(MockCarrierAdapter::failing(Carrier::FedEx)),
        ];

        let engine = RateAggregationEngine::with_defaults(carriers);
        let outcome = engine.available_services().await;

        assert_eq!(outcome.services.len(), 6);
        assert_eq!(outcome.services[0].provider(), Carrier::Usps);
        assert_eq!(outcome.services[2].provider(), Carrier::Ups);
        assert_eq!(outcome.services[4].provider(), Carrier::FedEx);
    }

    #[test]
    fn config_default_and_builders() {
        let config = AggregationConfig::default();
        assert_eq!(config.overall_timeout_ms, 30000);
        assert_eq!(config.per_carrier_timeout_ms, 10000);

        let config = AggregationConfig::default()
            .with_overall_timeout(5000)
            .with_per_carrier_timeout(1000);
        assert_eq!(config.overall_timeout_ms, 5000);
        assert_eq!(config.per_carrier_timeout_ms, 1000);
    }

    #[test]
    fn dedupe_preserves_first_seen_order() {
        let quotes = vec![
            live_quote(Carrier::Ups, "B"),
            live_quote(Carrier::Usps, "A"),
            live_quote(Carrier::Ups, "B"),
        ];
        let unique = dedupe(quotes);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].code(), "ups_B");
        assert_eq!(unique[1].code(), "usps_A");
    }
}
