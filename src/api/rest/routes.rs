//! # Route Definitions
//!
//! Router assembly for the shipping REST API.

use crate::api::rest::handlers::{self, AppState};
use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Builds the application router.
///
/// Shipping endpoints are nested under `/api/v1/shipping`; health lives at
/// `/api/v1/health`.
#[must_use]
pub fn create_router(state: Arc<AppState>) -> Router {
    let shipping = Router::new()
        .route("/services", get(handlers::get_services))
        .route("/options", post(handlers::post_options));

    Router::new()
        .nest("/api/v1/shipping", shipping)
        .route("/api/v1/health", get(handlers::get_health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
