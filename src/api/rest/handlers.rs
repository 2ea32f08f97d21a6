//! # REST Handlers
//!
//! Request/response types and handler functions for the shipping API.
//!
//! The `POST /options` body policy: a missing body, JSON `null`, or an
//! empty array is "no package data" and rejected with 400. Any JSON object
//! is treated as one package; an object that fails validation contributes
//! a warning and the batch degrades toward the static catalogs rather
//! than erroring.

use crate::application::error::ApplicationError;
use crate::application::services::rate_aggregation::{PackageWarning, RateAggregationEngine};
use crate::domain::entities::package::{Package, PackageValidationError};
use crate::domain::entities::service_quote::ServiceQuote;
use crate::domain::value_objects::{DimensionUnit, WeightUnit};
use crate::infrastructure::carriers::traits::CarrierStatus;
use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Shared state for the REST API.
#[derive(Debug)]
pub struct AppState {
    /// The aggregation engine serving all endpoints.
    pub engine: RateAggregationEngine,
}

impl AppState {
    /// Creates the shared state.
    #[must_use]
    pub fn new(engine: RateAggregationEngine) -> Self {
        Self { engine }
    }
}

/// Wire shape of one package in an options request. Every field is
/// optional; validation decides what is usable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageRequest {
    /// Package length.
    pub length: Option<f64>,
    /// Package width.
    pub width: Option<f64>,
    /// Package height.
    pub height: Option<f64>,
    /// Package weight.
    pub weight: Option<f64>,
    /// Dimension unit (`in` or `cm`).
    pub dimension_unit: Option<DimensionUnit>,
    /// Weight unit (`lb` or `kg`).
    pub weight_unit: Option<WeightUnit>,
    /// Origin postal code.
    pub origin_zip: Option<String>,
    /// Destination postal code.
    pub destination_zip: Option<String>,
}

impl PackageRequest {
    /// Validates the wire shape into a domain package.
    ///
    /// # Errors
    ///
    /// Returns [`PackageValidationError`] if any of the four numeric
    /// fields or either unit field is absent, or a numeric field is not a
    /// positive finite number.
    pub fn validate(self) -> Result<Package, PackageValidationError> {
        let length = self
            .length
            .ok_or(PackageValidationError::MissingField("length"))?;
        let width = self
            .width
            .ok_or(PackageValidationError::MissingField("width"))?;
        let height = self
            .height
            .ok_or(PackageValidationError::MissingField("height"))?;
        let weight = self
            .weight
            .ok_or(PackageValidationError::MissingField("weight"))?;
        let dimension_unit = self
            .dimension_unit
            .ok_or(PackageValidationError::MissingField("dimensionUnit"))?;
        let weight_unit = self
            .weight_unit
            .ok_or(PackageValidationError::MissingField("weightUnit"))?;

        Package::new(
            length,
            width,
            height,
            weight,
            dimension_unit,
            weight_unit,
            self.origin_zip,
            self.destination_zip,
        )
    }
}

/// Response body for `GET /services`.
#[derive(Debug, Serialize)]
pub struct ServicesResponse {
    /// Deduplicated available services.
    pub services: Vec<ServiceQuote>,
    /// True if any carrier served fallback data.
    pub degraded: bool,
}

/// Response body for `POST /options`.
#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    /// Deduplicated available services across the batch.
    pub services: Vec<ServiceQuote>,
    /// True if any carrier served fallback data.
    pub degraded: bool,
    /// Packages skipped during validation.
    pub warnings: Vec<PackageWarning>,
}

/// Response body for `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Per-carrier configuration state.
    pub carriers: Vec<CarrierStatus>,
}

/// JSON error body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

impl IntoResponse for ApplicationError {
    fn into_response(self) -> Response {
        let status = if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// `GET /services` - enumerates services for the reference package.
pub async fn get_services(State(state): State<Arc<AppState>>) -> Json<ServicesResponse> {
    let outcome = state.engine.available_services().await;
    Json(ServicesResponse {
        services: outcome.services,
        degraded: outcome.degraded,
    })
}

/// `POST /options` - enumerates services across a package batch.
///
/// # Errors
///
/// Returns `ApplicationError::Validation` (HTTP 400) when the body carries
/// no package data or is not valid JSON.
pub async fn post_options(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<OptionsResponse>, ApplicationError> {
    let batch = parse_package_batch(&body)?;
    let outcome = state.engine.shipping_options(batch).await;

    Ok(Json(OptionsResponse {
        services: outcome.services,
        degraded: outcome.degraded,
        warnings: outcome.warnings,
    }))
}

/// `GET /health` - reports per-carrier configuration state.
pub async fn get_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let carriers = state
        .engine
        .carriers()
        .iter()
        .map(|adapter| adapter.status())
        .collect();

    Json(HealthResponse {
        status: "ok",
        carriers,
    })
}

/// Applies the body policy and splits the payload into per-package
/// validation results.
fn parse_package_batch(
    body: &[u8],
) -> Result<Vec<Result<Package, PackageValidationError>>, ApplicationError> {
    if body.is_empty() {
        return Err(ApplicationError::no_package_data());
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ApplicationError::validation(format!("invalid JSON body: {}", e)))?;

    let elements = match value {
        Value::Array(items) if items.is_empty() => {
            return Err(ApplicationError::no_package_data());
        }
        Value::Array(items) => items,
        object @ Value::Object(_) => vec![object],
        _ => return Err(ApplicationError::no_package_data()),
    };

    Ok(elements
        .into_iter()
        .map(|element| {
            serde_json::from_value::<PackageRequest>(element)
                .map_err(|e| PackageValidationError::Malformed(e.to_string()))
                .and_then(PackageRequest::validate)
        })
        .collect())
}
