//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Domain Enums
//!
//! - [`Carrier`]: shipping providers queried by the aggregator
//! - [`DimensionUnit`], [`WeightUnit`]: input units with conversion to the
//!   inches/pounds the carrier APIs require

pub mod enums;

pub use enums::{Carrier, DimensionUnit, ParseEnumError, WeightUnit, CM_TO_IN, KG_TO_LB};
