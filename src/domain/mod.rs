//! # Domain Layer
//!
//! Entities and value objects shared by the application and infrastructure
//! layers. Nothing here performs I/O.

pub mod entities;
pub mod value_objects;
