//! # Infrastructure Layer
//!
//! Integrations with external systems: the carrier HTTP APIs and the
//! shared client plumbing they sit on.

pub mod carriers;
