//! # rateshop
//!
//! Shipping rate aggregation service for the festival marketplace.
//!
//! The service enumerates available shipping services for a batch of
//! packages by querying the USPS, UPS, and FedEx rating APIs concurrently,
//! normalizing their heterogeneous responses into a common
//! `{provider, service, code}` shape, and degrading to static per-carrier
//! fallback catalogs when credentials are missing or a live call fails.
//!
//! # Architecture
//!
//! - [`domain`] - entities ([`Package`](domain::entities::Package),
//!   [`ServiceQuote`](domain::entities::ServiceQuote)) and value objects
//! - [`infrastructure`] - one adapter per carrier behind the
//!   [`CarrierAdapter`](infrastructure::carriers::CarrierAdapter) trait,
//!   plus the shared HTTP/OAuth plumbing
//! - [`application`] - the
//!   [`RateAggregationEngine`](application::services::RateAggregationEngine)
//!   orchestrating concurrent lookups, fallback substitution, and
//!   deduplication
//! - [`api`] - the axum REST surface
//! - [`config`] - environment-driven settings with per-carrier optional
//!   credentials
//!
//! Carrier failures never surface to HTTP clients; responses instead carry
//! a `degraded` flag distinguishing live data from fallback data.

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
