//! # Domain Enums
//!
//! Enumeration types for domain concepts.
//!
//! This module provides the core enumerations used throughout the rate
//! aggregation service:
//!
//! - [`Carrier`] - Shipping providers (USPS, UPS, FedEx)
//! - [`DimensionUnit`] - Package dimension units with conversion to inches
//! - [`WeightUnit`] - Package weight units with conversion to pounds
//!
//! All enums implement `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`,
//! `Display`, `FromStr`, and Serde traits.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Centimeters to inches conversion factor.
pub const CM_TO_IN: f64 = 0.393701;

/// Kilograms to pounds conversion factor.
pub const KG_TO_LB: f64 = 2.20462;

/// A shipping provider exposing a rate/service-lookup API.
///
/// # Examples
///
/// ```
/// use rateshop::domain::value_objects::enums::Carrier;
///
/// let carrier = Carrier::Usps;
/// assert_eq!(carrier.to_string(), "USPS");
/// assert_eq!(carrier.code_prefix(), "usps");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Carrier {
    /// United States Postal Service.
    #[serde(rename = "USPS")]
    Usps = 0,
    /// United Parcel Service.
    #[serde(rename = "UPS")]
    Ups = 1,
    /// FedEx.
    #[serde(rename = "FedEx")]
    FedEx = 2,
}

impl Carrier {
    /// Returns the display name used in normalized quotes.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Usps => "USPS",
            Self::Ups => "UPS",
            Self::FedEx => "FedEx",
        }
    }

    /// Returns the lowercase prefix for machine-readable service codes,
    /// e.g. `usps` in `usps_PRIORITY_MAIL`.
    #[inline]
    #[must_use]
    pub const fn code_prefix(self) -> &'static str {
        match self {
            Self::Usps => "usps",
            Self::Ups => "ups",
            Self::FedEx => "fedex",
        }
    }
}

impl fmt::Display for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Carrier {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "USPS" => Ok(Self::Usps),
            "UPS" => Ok(Self::Ups),
            "FEDEX" => Ok(Self::FedEx),
            _ => Err(ParseEnumError::InvalidValue("Carrier", s.to_string())),
        }
    }
}

/// Unit for package dimensions.
///
/// Carrier APIs expect inches; [`DimensionUnit::to_inches`] performs the
/// conversion at payload-construction time.
///
/// # Examples
///
/// ```
/// use rateshop::domain::value_objects::enums::DimensionUnit;
///
/// let inches = DimensionUnit::Cm.to_inches(2.54);
/// assert!((inches - 1.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum DimensionUnit {
    /// Inches.
    #[default]
    #[serde(rename = "in")]
    In = 0,
    /// Centimeters.
    #[serde(rename = "cm")]
    Cm = 1,
}

impl DimensionUnit {
    /// Converts a value in this unit to inches.
    #[inline]
    #[must_use]
    pub fn to_inches(self, value: f64) -> f64 {
        match self {
            Self::In => value,
            Self::Cm => value * CM_TO_IN,
        }
    }
}

impl fmt::Display for DimensionUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::In => write!(f, "in"),
            Self::Cm => write!(f, "cm"),
        }
    }
}

impl FromStr for DimensionUnit {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "in" => Ok(Self::In),
            "cm" => Ok(Self::Cm),
            _ => Err(ParseEnumError::InvalidValue("DimensionUnit", s.to_string())),
        }
    }
}

/// Unit for package weight.
///
/// Carrier APIs expect pounds; [`WeightUnit::to_pounds`] performs the
/// conversion at payload-construction time.
///
/// # Examples
///
/// ```
/// use rateshop::domain::value_objects::enums::WeightUnit;
///
/// let pounds = WeightUnit::Kg.to_pounds(1.0);
/// assert!((pounds - 2.20462).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum WeightUnit {
    /// Pounds.
    #[default]
    #[serde(rename = "lb")]
    Lb = 0,
    /// Kilograms.
    #[serde(rename = "kg")]
    Kg = 1,
}

impl WeightUnit {
    /// Converts a value in this unit to pounds.
    #[inline]
    #[must_use]
    pub fn to_pounds(self, value: f64) -> f64 {
        match self {
            Self::Lb => value,
            Self::Kg => value * KG_TO_LB,
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lb => write!(f, "lb"),
            Self::Kg => write!(f, "kg"),
        }
    }
}

impl FromStr for WeightUnit {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lb" => Ok(Self::Lb),
            "kg" => Ok(Self::Kg),
            _ => Err(ParseEnumError::InvalidValue("WeightUnit", s.to_string())),
        }
    }
}

/// Error returned when parsing an enum from a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEnumError {
    /// The provided string value is not valid for the enum.
    InvalidValue(&'static str, String),
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue(enum_name, value) => {
                write!(f, "invalid {} value: '{}'", enum_name, value)
            }
        }
    }
}

impl std::error::Error for ParseEnumError {}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    mod carrier {
        use super::*;

        #[test]
        fn display() {
            assert_eq!(Carrier::Usps.to_string(), "USPS");
            assert_eq!(Carrier::Ups.to_string(), "UPS");
            assert_eq!(Carrier::FedEx.to_string(), "FedEx");
        }

        #[test]
        fn from_str_case_insensitive() {
            assert_eq!("usps".parse::<Carrier>().unwrap(), Carrier::Usps);
            assert_eq!("UPS".parse::<Carrier>().unwrap(), Carrier::Ups);
            assert_eq!("FedEx".parse::<Carrier>().unwrap(), Carrier::FedEx);
        }

        #[test]
        fn from_str_invalid() {
            let err = "DHL".parse::<Carrier>().unwrap_err();
            assert!(err.to_string().contains("DHL"));
        }

        #[test]
        fn serde_wire_names() {
            assert_eq!(serde_json::to_string(&Carrier::Usps).unwrap(), "\"USPS\"");
            assert_eq!(serde_json::to_string(&Carrier::FedEx).unwrap(), "\"FedEx\"");
            let parsed: Carrier = serde_json::from_str("\"UPS\"").unwrap();
            assert_eq!(parsed, Carrier::Ups);
        }

        #[test]
        fn code_prefixes() {
            assert_eq!(Carrier::Usps.code_prefix(), "usps");
            assert_eq!(Carrier::Ups.code_prefix(), "ups");
            assert_eq!(Carrier::FedEx.code_prefix(), "fedex");
        }
    }

    mod dimension_unit {
        use super::*;

        #[test]
        fn inches_pass_through() {
            assert!((DimensionUnit::In.to_inches(10.0) - 10.0).abs() < f64::EPSILON);
        }

        #[test]
        fn centimeters_convert() {
            assert!((DimensionUnit::Cm.to_inches(2.54) - 1.0).abs() < 1e-5);
        }

        #[test]
        fn serde_round_trip() {
            let parsed: DimensionUnit = serde_json::from_str("\"cm\"").unwrap();
            assert_eq!(parsed, DimensionUnit::Cm);
            assert_eq!(serde_json::to_string(&DimensionUnit::In).unwrap(), "\"in\"");
        }
    }

    mod weight_unit {
        use super::*;

        #[test]
        fn pounds_pass_through() {
            assert!((WeightUnit::Lb.to_pounds(1.0) - 1.0).abs() < f64::EPSILON);
        }

        #[test]
        fn kilograms_convert() {
            assert!((WeightUnit::Kg.to_pounds(1.0) - 2.20462).abs() < 1e-6);
        }
    }

    proptest! {
        #[test]
        fn conversion_preserves_sign_and_order(a in 0.001f64..1e6, b in 0.001f64..1e6) {
            let (lo, hi) = if a < b { (a, b) } else { (b, a) };
            prop_assert!(DimensionUnit::Cm.to_inches(lo) <= DimensionUnit::Cm.to_inches(hi));
            prop_assert!(WeightUnit::Kg.to_pounds(lo) > 0.0);
            prop_assert!(WeightUnit::Kg.to_pounds(lo) <= WeightUnit::Kg.to_pounds(hi));
        }
    }
}
