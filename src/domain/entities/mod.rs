//! # Domain Entities
//!
//! Core domain objects of the rate aggregation service.
//!
//! - [`Package`](package::Package): validated shipment input
//! - [`ServiceQuote`](service_quote::ServiceQuote): normalized service output

pub mod package;
pub mod service_quote;

pub use package::{Package, PackageValidationError};
pub use service_quote::ServiceQuote;
