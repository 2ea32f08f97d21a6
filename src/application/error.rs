//! # Application Errors
//!
//! Error types for the application layer.
//!
//! Per-carrier failures are absorbed by the aggregation engine, so the
//! errors here cover the remaining surface: request validation and
//! genuinely unexpected internal failures.
//!
//! # Examples
//!
//! ```
//! use rateshop::application::error::ApplicationError;
//!
//! let err = ApplicationError::no_package_data();
//! assert!(err.is_client_error());
//! assert_eq!(err.to_string(), "No package data provided");
//! ```

use crate::infrastructure::carriers::error::CarrierError;
use thiserror::Error;

/// Application layer error.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Input validation failure; maps to HTTP 400.
    #[error("{0}")]
    Validation(String),

    /// Carrier error that escaped the aggregation layer.
    #[error(transparent)]
    Carrier(#[from] CarrierError),

    /// Unexpected internal failure; maps to HTTP 500.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// The canonical "no package data provided" rejection for an empty
    /// options request.
    #[must_use]
    pub fn no_package_data() -> Self {
        Self::Validation("No package data provided".to_string())
    }

    /// Returns true if the error is the caller's fault.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_package_data_message() {
        let err = ApplicationError::no_package_data();
        assert_eq!(err.to_string(), "No package data provided");
        assert!(err.is_client_error());
    }

    #[test]
    fn carrier_error_wraps_transparently() {
        let err: ApplicationError = CarrierError::timeout("slow").into();
        assert!(err.to_string().contains("timeout"));
        assert!(!err.is_client_error());
    }

    #[test]
    fn internal_is_not_client_error() {
        let err = ApplicationError::internal("task panicked");
        assert!(!err.is_client_error());
        assert!(err.to_string().contains("task panicked"));
    }
}
