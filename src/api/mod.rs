//! # API Layer
//!
//! External interfaces to the aggregation service.

pub mod rest;
