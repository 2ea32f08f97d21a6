//! # Application Services
//!
//! Services that orchestrate domain logic and infrastructure.
//!
//! - [`RateAggregationEngine`]: concurrent carrier lookups with fallback
//!   substitution and deduplication

pub mod rate_aggregation;

pub use rate_aggregation::{
    AggregationConfig, AggregationOutcome, PackageWarning, RateAggregationEngine,
};
