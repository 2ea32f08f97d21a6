//! # REST API
//!
//! REST endpoints using axum for the shipping rate aggregation service.
//!
//! # Endpoints
//!
//! ## Shipping
//! - `GET /api/v1/shipping/services` - Enumerate available services for
//!   the reference package
//! - `POST /api/v1/shipping/options` - Enumerate available services for a
//!   package batch (single object or array)
//!
//! ## Health
//! - `GET /api/v1/health` - Health check with per-carrier configuration
//!   state
//!
//! # Usage
//!
//! ```ignore
//! use rateshop::api::rest::{create_router, AppState};
//! use rateshop::application::services::RateAggregationEngine;
//! use std::sync::Arc;
//!
//! let state = Arc::new(AppState::new(RateAggregationEngine::with_defaults(carriers)));
//! let router = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, router).await?;
//! ```

pub mod handlers;
pub mod routes;

pub use handlers::{
    AppState, ErrorResponse, HealthResponse, OptionsResponse, PackageRequest, ServicesResponse,
};
pub use routes::create_router;
