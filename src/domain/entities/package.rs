//! # Package Entity
//!
//! A validated physical shipment, the unit of a single rate lookup.
//!
//! This module provides the [`Package`] entity holding dimensions, weight,
//! units, and optional origin/destination postal codes. Construction
//! validates every numeric field; an unvalidated wire shape never reaches
//! the carrier adapters.
//!
//! # Examples
//!
//! ```
//! use rateshop::domain::entities::package::Package;
//! use rateshop::domain::value_objects::{DimensionUnit, WeightUnit};
//!
//! let package = Package::new(
//!     10.0,
//!     5.0,
//!     5.0,
//!     1.0,
//!     DimensionUnit::In,
//!     WeightUnit::Lb,
//!     None,
//!     None,
//! )
//! .unwrap();
//!
//! assert!((package.weight_lb() - 1.0).abs() < f64::EPSILON);
//! ```

use crate::domain::value_objects::{DimensionUnit, WeightUnit};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Origin ZIP used when a package carries none (reference package).
pub const REFERENCE_ORIGIN_ZIP: &str = "94105";

/// Destination ZIP used when a package carries none (reference package).
pub const REFERENCE_DESTINATION_ZIP: &str = "10001";

/// Validation error for package construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PackageValidationError {
    /// A required numeric field is absent.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A numeric field is NaN or infinite.
    #[error("field {field} is not a finite number: {value}")]
    NotFinite {
        /// Field name.
        field: &'static str,
        /// Offending value.
        value: f64,
    },

    /// A numeric field is zero or negative.
    #[error("field {field} must be positive, got {value}")]
    NotPositive {
        /// Field name.
        field: &'static str,
        /// Offending value.
        value: f64,
    },

    /// The wire object could not be interpreted as a package at all.
    #[error("malformed package object: {0}")]
    Malformed(String),
}

/// A validated physical shipment.
///
/// All four numeric fields are guaranteed finite and positive. Units are
/// carried alongside the raw values; carrier payload construction converts
/// through [`dimensions_in`](Self::dimensions_in) and
/// [`weight_lb`](Self::weight_lb).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    length: f64,
    width: f64,
    height: f64,
    weight: f64,
    dimension_unit: DimensionUnit,
    weight_unit: WeightUnit,
    origin_zip: Option<String>,
    destination_zip: Option<String>,
}

impl Package {
    /// Creates a validated package.
    ///
    /// # Errors
    ///
    /// Returns [`PackageValidationError`] if any of the four numeric fields
    /// is NaN, infinite, zero, or negative.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        length: f64,
        width: f64,
        height: f64,
        weight: f64,
        dimension_unit: DimensionUnit,
        weight_unit: WeightUnit,
        origin_zip: Option<String>,
        destination_zip: Option<String>,
    ) -> Result<Self, PackageValidationError> {
        for (field, value) in [
            ("length", length),
            ("width", width),
            ("height", height),
            ("weight", weight),
        ] {
            if !value.is_finite() {
                return Err(PackageValidationError::NotFinite { field, value });
            }
            if value <= 0.0 {
                return Err(PackageValidationError::NotPositive { field, value });
            }
        }

        Ok(Self {
            length,
            width,
            height,
            weight,
            dimension_unit,
            weight_unit,
            origin_zip,
            destination_zip,
        })
    }

    /// Returns the hardcoded reference package used for the static service
    /// enumeration: 10 x 5 x 5 in, 1 lb, 94105 to 10001.
    #[must_use]
    pub fn reference() -> Self {
        Self {
            length: 10.0,
            width: 5.0,
            height: 5.0,
            weight: 1.0,
            dimension_unit: DimensionUnit::In,
            weight_unit: WeightUnit::Lb,
            origin_zip: None,
            destination_zip: None,
        }
    }

    /// Returns the raw length in the input unit.
    #[inline]
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Returns the raw width in the input unit.
    #[inline]
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Returns the raw height in the input unit.
    #[inline]
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Returns the raw weight in the input unit.
    #[inline]
    #[must_use]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Returns the dimension unit.
    #[inline]
    #[must_use]
    pub fn dimension_unit(&self) -> DimensionUnit {
        self.dimension_unit
    }

    /// Returns the weight unit.
    #[inline]
    #[must_use]
    pub fn weight_unit(&self) -> WeightUnit {
        self.weight_unit
    }

    /// Returns `(length, width, height)` converted to inches.
    #[must_use]
    pub fn dimensions_in(&self) -> (f64, f64, f64) {
        (
            self.dimension_unit.to_inches(self.length),
            self.dimension_unit.to_inches(self.width),
            self.dimension_unit.to_inches(self.height),
        )
    }

    /// Returns the weight converted to pounds.
    #[must_use]
    pub fn weight_lb(&self) -> f64 {
        self.weight_unit.to_pounds(self.weight)
    }

    /// Returns the origin ZIP, falling back to the reference origin.
    #[must_use]
    pub fn origin_zip(&self) -> &str {
        self.origin_zip.as_deref().unwrap_or(REFERENCE_ORIGIN_ZIP)
    }

    /// Returns the destination ZIP, falling back to the reference destination.
    #[must_use]
    pub fn destination_zip(&self) -> &str {
        self.destination_zip
            .as_deref()
            .unwrap_or(REFERENCE_DESTINATION_ZIP)
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Package({}x{}x{}{} {}{} {}->{})",
            self.length,
            self.width,
            self.height,
            self.dimension_unit,
            self.weight,
            self.weight_unit,
            self.origin_zip(),
            self.destination_zip()
        )
    }
}
