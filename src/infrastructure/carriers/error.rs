//! # Carrier Errors
//!
//! Error types for carrier adapter operations.
//!
//! This module provides error types for carrier API interactions: OAuth
//! token requests, rate lookups, and response mapping. Credential absence
//! is modeled as its own variant because it is an expected runtime state
//! (the aggregator substitutes the static fallback catalog), not a fault.
//!
//! # Examples
//!
//! ```
//! use rateshop::domain::value_objects::Carrier;
//! use rateshop::infrastructure::carriers::error::CarrierError;
//!
//! let error = CarrierError::timeout("rate request timed out after 10000ms");
//! assert!(error.is_retryable());
//!
//! let error = CarrierError::missing_credentials(Carrier::Ups);
//! assert!(error.is_config_error());
//! ```

use crate::domain::value_objects::Carrier;
use thiserror::Error;

/// Error type for carrier adapter operations.
#[derive(Debug, Clone, Error)]
pub enum CarrierError {
    /// The carrier's credential pair is absent from configuration.
    #[error("missing {carrier} credentials")]
    MissingCredentials {
        /// The carrier lacking credentials.
        carrier: Carrier,
    },

    /// Request timed out.
    #[error("carrier timeout: {message}")]
    Timeout {
        /// Error message.
        message: String,
        /// Timeout duration in milliseconds.
        timeout_ms: Option<u64>,
    },

    /// Network or connection error.
    #[error("carrier connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// Token request rejected or bearer token refused.
    #[error("carrier authentication error: {message}")]
    Authentication {
        /// Error message.
        message: String,
    },

    /// Rate limit exceeded.
    #[error("carrier rate limit exceeded: {message}")]
    RateLimited {
        /// Error message.
        message: String,
    },

    /// The carrier rejected the request parameters.
    #[error("carrier invalid request: {message}")]
    InvalidRequest {
        /// Error message.
        message: String,
    },

    /// Malformed or unexpected response body.
    #[error("carrier protocol error: {message}")]
    Protocol {
        /// Error message.
        message: String,
    },

    /// Internal adapter error.
    #[error("carrier internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl CarrierError {
    /// Creates a missing-credentials error.
    #[must_use]
    pub fn missing_credentials(carrier: Carrier) -> Self {
        Self::MissingCredentials { carrier }
    }

    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
            timeout_ms: None,
        }
    }

    /// Creates a timeout error with duration.
    #[must_use]
    pub fn timeout_with_duration(message: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            message: message.into(),
            timeout_ms: Some(timeout_ms),
        }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates an authentication error.
    #[must_use]
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Creates a rate limited error.
    #[must_use]
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::RateLimited {
            message: message.into(),
        }
    }

    /// Creates an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Creates a protocol error.
    #[must_use]
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this error is transient and may succeed on retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. } | Self::Connection { .. } | Self::RateLimited { .. }
        )
    }

    /// Returns true if this error reflects local configuration rather than
    /// a carrier fault.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::MissingCredentials { .. })
    }

    /// Returns true if the carrier rejected the request itself.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidRequest { .. } | Self::Authentication { .. }
        )
    }
}

/// Result type for carrier operations.
pub type CarrierResult<T> = Result<T, CarrierError>;
